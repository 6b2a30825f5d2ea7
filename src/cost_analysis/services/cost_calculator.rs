//! Per-resource cost comparison: the orchestrating core of the engine.

use std::collections::BTreeMap;

use crate::cost_analysis::domain::{
    vm_price_sku, CostComparison, ManagedDisk, OptionCost, OsKind, PriceCatalog, PurchaseOption,
    Resource, ResourceKind, VirtualMachine,
};
use crate::cost_analysis::services::unit_normalizer::{self, HOURS_PER_MONTH};

/// Alternative purchase options evaluated for every virtual machine.
const VM_CANDIDATE_OPTIONS: &[PurchaseOption] = &[
    PurchaseOption::Spot,
    PurchaseOption::LowPriority,
    PurchaseOption::SavingsPlan1Yr,
    PurchaseOption::SavingsPlan3Yr,
    PurchaseOption::Reservation1Yr,
    PurchaseOption::Reservation3Yr,
];

/// Computes one `CostComparison` per resource against an immutable priced
/// catalog. Commitment prices in the catalog are already-amortized rates;
/// this calculator normalizes them to monthly exactly once and never
/// re-divides by the term length.
///
/// Missing price points and unsupported units drop one option from the
/// comparison map; a resource whose *current* configuration cannot be
/// priced yields `None` and is skipped by the caller.
pub struct CostCalculator<'a> {
    catalog: &'a PriceCatalog,
    /// Hourly Windows Server license component per vCPU, deducted by the
    /// hybrid benefit. Configurable; see azsm.config.yml.
    windows_license_per_core: f64,
}

impl<'a> CostCalculator<'a> {
    pub fn new(catalog: &'a PriceCatalog, windows_license_per_core: f64) -> Self {
        Self {
            catalog,
            windows_license_per_core,
        }
    }

    pub fn compare(&self, resource: &Resource) -> Option<CostComparison> {
        match resource {
            Resource::VirtualMachine(vm) => self.compare_vm(vm),
            Resource::ManagedDisk(disk) => self.compare_disk(disk),
        }
    }

    /// Monthly cost of one catalog entry for a VM, scaled by the VM's
    /// expected runtime hours.
    fn vm_monthly(&self, vm: &VirtualMachine, sku: &str, option: PurchaseOption) -> Option<f64> {
        let entry = self.catalog.get(sku, &vm.region, option)?;
        let full_month = unit_normalizer::entry_monthly(entry, None).ok()?;
        Some(full_month * (vm.monthly_hours / HOURS_PER_MONTH))
    }

    fn compare_vm(&self, vm: &VirtualMachine) -> Option<CostComparison> {
        let sku = vm_price_sku(&vm.size, vm.os);
        let current = self.vm_monthly(vm, &sku, vm.current_option)?;

        let mut options = BTreeMap::new();
        for &option in VM_CANDIDATE_OPTIONS {
            if option == vm.current_option {
                continue;
            }
            if let Some(candidate) = self.vm_monthly(vm, &sku, option) {
                options.insert(
                    option.label().to_string(),
                    OptionCost::from_costs(current, candidate),
                );
            }
        }

        // The license deduction also stacks on top of savings-plan rates.
        if let Some(license_monthly) = self.windows_license_monthly(vm) {
            let hybrid_rows = [
                (PurchaseOption::PayAsYouGo, PurchaseOption::HybridBenefit.label()),
                (PurchaseOption::SavingsPlan1Yr, "Hybrid Benefit + Savings Plan (1 Yr)"),
                (PurchaseOption::SavingsPlan3Yr, "Hybrid Benefit + Savings Plan (3 Yr)"),
            ];
            for (base, label) in hybrid_rows {
                if let Some(base_monthly) = self.vm_monthly(vm, &sku, base) {
                    options.insert(
                        label.to_string(),
                        OptionCost::from_costs(current, (base_monthly - license_monthly).max(0.0)),
                    );
                }
            }
        }

        Some(CostComparison {
            resource_id: vm.id.clone(),
            resource_name: vm.name.clone(),
            resource_kind: ResourceKind::VirtualMachine,
            current_monthly_cost: current,
            options,
        })
    }

    /// Monthly Windows license component for the VM's core count, scaled
    /// by its runtime hours. The deduction behind every hybrid-benefit
    /// row; `None` unless the VM is license-eligible, Windows, and has a
    /// known vCPU count.
    fn windows_license_monthly(&self, vm: &VirtualMachine) -> Option<f64> {
        if !vm.hybrid_benefit_eligible || vm.os != OsKind::Windows {
            return None;
        }
        let vcpus = vm.vcpus?;
        Some(self.windows_license_per_core * vcpus as f64 * vm.monthly_hours)
    }

    fn compare_disk(&self, disk: &ManagedDisk) -> Option<CostComparison> {
        // A disk larger than its own family's top tier cannot be priced.
        let tier = disk.family.resolve(disk.size_gib).ok()?;
        let current_entry = self
            .catalog
            .get(tier.code, &disk.region, disk.current_option)?;
        let current =
            unit_normalizer::entry_monthly(current_entry, Some(tier.size_gib)).ok()?;

        let mut options = BTreeMap::new();

        // Commitment pricing at the disk's own resolved tier.
        if disk.current_option != PurchaseOption::Reservation1Yr {
            if let Some(entry) =
                self.catalog
                    .get(tier.code, &disk.region, PurchaseOption::Reservation1Yr)
            {
                if let Ok(candidate) = unit_normalizer::entry_monthly(entry, Some(tier.size_gib)) {
                    options.insert(
                        PurchaseOption::Reservation1Yr.label().to_string(),
                        OptionCost::from_costs(current, candidate),
                    );
                }
            }
        }

        // Alternative performance families, GiB for GiB. Each family has
        // its own ladder, so resolution restarts from the requested size.
        for family in disk.family.others() {
            let alt_tier = match family.resolve(disk.size_gib) {
                Ok(t) => t,
                Err(_) => continue,
            };
            let Some(entry) =
                self.catalog
                    .get(alt_tier.code, &disk.region, PurchaseOption::PayAsYouGo)
            else {
                continue;
            };
            let Ok(candidate) = unit_normalizer::entry_monthly(entry, Some(alt_tier.size_gib))
            else {
                continue;
            };
            options.insert(
                family.label().to_string(),
                OptionCost::from_costs(current, candidate),
            );
        }

        Some(CostComparison {
            resource_id: disk.id.clone(),
            resource_name: disk.name.clone(),
            resource_kind: ResourceKind::ManagedDisk,
            current_monthly_cost: current,
            options,
        })
    }
}
