use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::disk_tier::DiskFamily;
use super::price_entry::PurchaseOption;
use crate::cost_analysis::services::unit_normalizer::HOURS_PER_MONTH;

/// Operating system of a virtual machine, as far as pricing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OsKind {
    Linux,
    Windows,
}

/// Discriminant for the two billable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    VirtualMachine,
    ManagedDisk,
}

/// One virtual machine from the subscription inventory.
///
/// Immutable after collection; the calculator only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: String,
    pub name: String,
    pub region: String,
    /// Azure size code, e.g. `Standard_D4as_v5`.
    pub size: String,
    pub os: OsKind,
    /// vCPU count, when it could be determined. Needed for the
    /// hybrid-benefit license deduction; absent means the hybrid option
    /// is skipped for this VM.
    #[serde(default)]
    pub vcpus: Option<u32>,
    /// Expected runtime hours per month. Defaults to a full month.
    #[serde(default = "default_monthly_hours")]
    pub monthly_hours: f64,
    pub current_option: PurchaseOption,
    /// Whether the workload holds an eligible on-premises Windows license.
    #[serde(default)]
    pub hybrid_benefit_eligible: bool,
    #[serde(default)]
    pub power_state: Option<String>,
}

fn default_monthly_hours() -> f64 {
    HOURS_PER_MONTH
}

/// One managed disk from the subscription inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedDisk {
    pub id: String,
    pub name: String,
    pub region: String,
    pub family: DiskFamily,
    pub size_gib: u64,
    pub current_option: PurchaseOption,
}

/// A billable cloud object. Closed set: the calculator matches
/// exhaustively on the variant instead of probing attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Resource {
    VirtualMachine(VirtualMachine),
    ManagedDisk(ManagedDisk),
}

impl Resource {
    pub fn id(&self) -> &str {
        match self {
            Resource::VirtualMachine(vm) => &vm.id,
            Resource::ManagedDisk(disk) => &disk.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::VirtualMachine(vm) => &vm.name,
            Resource::ManagedDisk(disk) => &disk.name,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            Resource::VirtualMachine(vm) => &vm.region,
            Resource::ManagedDisk(disk) => &disk.region,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::VirtualMachine(_) => ResourceKind::VirtualMachine,
            Resource::ManagedDisk(_) => ResourceKind::ManagedDisk,
        }
    }
}

/// Provenance of an inventory snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMetadata {
    pub subscription_id: String,
    pub generated_at: DateTime<Utc>,
}

/// The complete resource inventory for one analysis run.
///
/// Serializable so a run can be exported with --export and replayed
/// offline with --snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub metadata: InventoryMetadata,
    pub resources: Vec<Resource>,
}

impl Inventory {
    pub fn new(subscription_id: String, resources: Vec<Resource>) -> Self {
        Self {
            metadata: InventoryMetadata {
                subscription_id,
                generated_at: Utc::now(),
            },
            resources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn vm_count(&self) -> usize {
        self.resources
            .iter()
            .filter(|r| r.kind() == ResourceKind::VirtualMachine)
            .count()
    }

    pub fn disk_count(&self) -> usize {
        self.resources
            .iter()
            .filter(|r| r.kind() == ResourceKind::ManagedDisk)
            .count()
    }
}
