use serde::{Deserialize, Serialize};

use crate::shared::CostError;

/// Managed-disk performance family. Each family has its own independent
/// size ladder; cross-family comparison resolves by GiB, never by mapping
/// tier codes between families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiskFamily {
    PremiumSsd,
    StandardSsd,
    StandardHdd,
}

/// One rung on a family's size ladder: the billed capacity and its
/// canonical tier code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskTier {
    pub family: DiskFamily,
    pub code: &'static str,
    pub size_gib: u64,
}

/// (billed GiB, tier code) ladders, strictly increasing in size.
const PREMIUM_SSD_TIERS: &[(u64, &str)] = &[
    (4, "P1"),
    (8, "P2"),
    (16, "P3"),
    (32, "P4"),
    (64, "P6"),
    (128, "P10"),
    (256, "P15"),
    (512, "P20"),
    (1024, "P30"),
    (2048, "P40"),
    (4096, "P50"),
    (8192, "P60"),
    (16384, "P70"),
    (32767, "P80"),
];

const STANDARD_SSD_TIERS: &[(u64, &str)] = &[
    (4, "E1"),
    (8, "E2"),
    (16, "E3"),
    (32, "E4"),
    (64, "E6"),
    (128, "E10"),
    (256, "E15"),
    (512, "E20"),
    (1024, "E30"),
    (2048, "E40"),
    (4096, "E50"),
    (8192, "E60"),
    (16384, "E70"),
    (32767, "E80"),
];

const STANDARD_HDD_TIERS: &[(u64, &str)] = &[
    (32, "S4"),
    (64, "S6"),
    (128, "S10"),
    (256, "S15"),
    (512, "S20"),
    (1024, "S30"),
    (2048, "S40"),
    (4096, "S50"),
    (8192, "S60"),
    (16384, "S70"),
    (32767, "S80"),
];

impl DiskFamily {
    /// Display name, also used as the option key for cross-family rows in
    /// a disk's comparison map.
    pub fn label(&self) -> &'static str {
        match self {
            DiskFamily::PremiumSsd => "Premium SSD",
            DiskFamily::StandardSsd => "Standard SSD",
            DiskFamily::StandardHdd => "Standard HDD",
        }
    }

    /// The ARM storage account type this family corresponds to.
    pub fn from_sku_name(sku_name: &str) -> Option<Self> {
        // ZRS variants share the LRS size ladder and tier codes.
        match sku_name.replace("_ZRS", "_LRS").as_str() {
            "Premium_LRS" => Some(DiskFamily::PremiumSsd),
            "StandardSSD_LRS" => Some(DiskFamily::StandardSsd),
            "Standard_LRS" => Some(DiskFamily::StandardHdd),
            _ => None,
        }
    }

    /// Product name used by the retail prices feed for this family.
    pub fn product_name(&self) -> &'static str {
        match self {
            DiskFamily::PremiumSsd => "Premium SSD Managed Disks",
            DiskFamily::StandardSsd => "Standard SSD Managed Disks",
            DiskFamily::StandardHdd => "Standard HDD Managed Disks",
        }
    }

    fn ladder(&self) -> &'static [(u64, &'static str)] {
        match self {
            DiskFamily::PremiumSsd => PREMIUM_SSD_TIERS,
            DiskFamily::StandardSsd => STANDARD_SSD_TIERS,
            DiskFamily::StandardHdd => STANDARD_HDD_TIERS,
        }
    }

    /// The other two families, for GiB-for-GiB alternative comparisons.
    pub fn others(&self) -> [DiskFamily; 2] {
        match self {
            DiskFamily::PremiumSsd => [DiskFamily::StandardSsd, DiskFamily::StandardHdd],
            DiskFamily::StandardSsd => [DiskFamily::PremiumSsd, DiskFamily::StandardHdd],
            DiskFamily::StandardHdd => [DiskFamily::PremiumSsd, DiskFamily::StandardSsd],
        }
    }

    /// Resolve a requested size to the smallest tier whose capacity is at
    /// least `size_gib`. An exact match returns that tier. Sizes beyond
    /// the top rung fail with `SizeExceedsMaximumTier`.
    pub fn resolve(&self, size_gib: u64) -> Result<DiskTier, CostError> {
        self.ladder()
            .iter()
            .find(|(capacity, _)| *capacity >= size_gib)
            .map(|(capacity, code)| DiskTier {
                family: *self,
                code,
                size_gib: *capacity,
            })
            .ok_or_else(|| CostError::SizeExceedsMaximumTier {
                family: self.label().to_string(),
                size_gib,
            })
    }

    /// Every tier on this family's ladder.
    pub fn tiers(&self) -> impl Iterator<Item = DiskTier> + '_ {
        self.ladder().iter().map(|(capacity, code)| DiskTier {
            family: *self,
            code,
            size_gib: *capacity,
        })
    }
}
