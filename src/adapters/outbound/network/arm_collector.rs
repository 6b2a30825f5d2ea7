use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use crate::cost_analysis::domain::{
    DiskFamily, Inventory, ManagedDisk, OsKind, PurchaseOption, Resource, VirtualMachine,
};
use crate::cost_analysis::services::HOURS_PER_MONTH;
use crate::ports::outbound::InventorySource;
use crate::shared::{CostError, Result};

const ARM_BASE_URL: &str = "https://management.azure.com";
const VM_API_VERSION: &str = "2024-07-01";
const DISK_API_VERSION: &str = "2024-03-02";

#[derive(Debug, Deserialize)]
struct ListPage<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(rename = "nextLink", default)]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VmRecord {
    id: String,
    name: String,
    location: String,
    #[serde(default)]
    properties: Option<VmProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VmProperties {
    hardware_profile: Option<HardwareProfile>,
    storage_profile: Option<StorageProfile>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    license_type: Option<String>,
    /// Present when the listing is made with `statusOnly=true`.
    #[serde(default)]
    instance_view: Option<InstanceView>,
}

#[derive(Debug, Deserialize)]
struct InstanceView {
    #[serde(default)]
    statuses: Vec<InstanceStatus>,
}

#[derive(Debug, Deserialize)]
struct InstanceStatus {
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardwareProfile {
    vm_size: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageProfile {
    os_disk: Option<OsDisk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OsDisk {
    os_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiskRecord {
    id: String,
    name: String,
    location: String,
    #[serde(default)]
    sku: Option<DiskSku>,
    #[serde(default)]
    properties: Option<DiskProperties>,
}

#[derive(Debug, Deserialize)]
struct DiskSku {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiskProperties {
    disk_size_g_b: Option<u64>,
}

/// Inventory collector against the Azure Resource Manager REST API.
///
/// Lists every VM and managed disk in the subscription using a caller
/// supplied management-plane bearer token (e.g. from
/// `az account get-access-token`). Records this version cannot interpret
/// (unknown disk family, missing size) are skipped, not fatal.
#[derive(Debug)]
pub struct ArmInventoryCollector {
    client: reqwest::Client,
    subscription_id: String,
    access_token: String,
}

impl ArmInventoryCollector {
    pub fn new(subscription_id: String, access_token: String) -> Result<Self> {
        if access_token.trim().is_empty() {
            return Err(CostError::AuthenticationError {
                details: "no access token supplied".to_string(),
            }
            .into());
        }
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("azsm/{}", version))
            .build()?;
        Ok(Self {
            client,
            subscription_id,
            access_token,
        })
    }

    async fn list_all<T: serde::de::DeserializeOwned>(&self, first_url: String) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut url = first_url;
        loop {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.access_token)
                .send()
                .await
                .map_err(|e| CostError::CollectionError {
                    details: e.to_string(),
                })?;

            match response.status() {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(CostError::AuthenticationError {
                        details: format!("ARM returned status code {}", response.status()),
                    }
                    .into());
                }
                status if !status.is_success() => {
                    return Err(CostError::CollectionError {
                        details: format!("ARM returned status code {}", status),
                    }
                    .into());
                }
                _ => {}
            }

            let page: ListPage<T> = response.json().await.map_err(|e| {
                CostError::CollectionError {
                    details: format!("failed to decode ARM response: {}", e),
                }
            })?;
            records.extend(page.value);

            match page.next_link {
                Some(next) if !next.is_empty() => url = next,
                _ => break,
            }
        }
        Ok(records)
    }

    fn map_vm(record: VmRecord) -> Option<Resource> {
        let properties = record.properties?;
        let size = properties.hardware_profile.and_then(|h| h.vm_size)?;

        let os = match properties
            .storage_profile
            .and_then(|s| s.os_disk)
            .and_then(|d| d.os_type)
            .as_deref()
        {
            Some("Windows") => OsKind::Windows,
            _ => OsKind::Linux,
        };

        let current_option = match properties.priority.as_deref() {
            Some("Spot") => PurchaseOption::Spot,
            Some("Low") => PurchaseOption::LowPriority,
            _ => PurchaseOption::PayAsYouGo,
        };

        // A VM already running with the AHB license applied is not a
        // further saving opportunity.
        let hybrid_benefit_eligible = os == OsKind::Windows
            && properties.license_type.as_deref() != Some("Windows_Server");

        let power_state = power_state(properties.instance_view.as_ref());

        Some(Resource::VirtualMachine(VirtualMachine {
            id: record.id,
            name: record.name,
            region: record.location,
            vcpus: vcpus_from_size(&size),
            size,
            os,
            monthly_hours: HOURS_PER_MONTH,
            current_option,
            hybrid_benefit_eligible,
            power_state,
        }))
    }

    fn map_disk(record: DiskRecord) -> Option<Resource> {
        let sku_name = record.sku.and_then(|s| s.name)?;
        let family = DiskFamily::from_sku_name(&sku_name)?;
        let size_gib = record.properties.and_then(|p| p.disk_size_g_b)?;

        Some(Resource::ManagedDisk(ManagedDisk {
            id: record.id,
            name: record.name,
            region: record.location,
            family,
            size_gib,
            current_option: PurchaseOption::PayAsYouGo,
        }))
    }
}

/// Extract the power state ("running", "deallocated", ...) from the
/// instance view's `PowerState/...` status code.
fn power_state(instance_view: Option<&InstanceView>) -> Option<String> {
    instance_view?
        .statuses
        .iter()
        .filter_map(|status| status.code.as_deref())
        .find_map(|code| code.strip_prefix("PowerState/").map(str::to_string))
}

/// Infer the vCPU count from an Azure size code: the digits after the
/// family letters, e.g. `Standard_D4as_v5` has 4 and `Standard_E16s_v3`
/// has 16. Returns `None` for codes that do not follow the scheme.
pub fn vcpus_from_size(size: &str) -> Option<u32> {
    let body = size.strip_prefix("Standard_").or_else(|| size.strip_prefix("Basic_"))?;
    let digits: String = body
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[async_trait]
impl InventorySource for ArmInventoryCollector {
    async fn collect(&self) -> Result<Inventory> {
        // statusOnly adds the instance view (power state) to each record.
        let vm_url = format!(
            "{}/subscriptions/{}/providers/Microsoft.Compute/virtualMachines?api-version={}&statusOnly=true",
            ARM_BASE_URL, self.subscription_id, VM_API_VERSION
        );
        let disk_url = format!(
            "{}/subscriptions/{}/providers/Microsoft.Compute/disks?api-version={}",
            ARM_BASE_URL, self.subscription_id, DISK_API_VERSION
        );

        let vms: Vec<VmRecord> = self.list_all(vm_url).await?;
        let disks: Vec<DiskRecord> = self.list_all(disk_url).await?;

        let resources = vms
            .into_iter()
            .filter_map(Self::map_vm)
            .chain(disks.into_iter().filter_map(Self::map_disk))
            .collect();

        Ok(Inventory::new(self.subscription_id.clone(), resources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_requires_token() {
        let result = ArmInventoryCollector::new("sub".to_string(), "  ".to_string());
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Authentication failed"));
    }

    #[test]
    fn test_vcpus_from_size() {
        assert_eq!(vcpus_from_size("Standard_D4as_v5"), Some(4));
        assert_eq!(vcpus_from_size("Standard_E16s_v3"), Some(16));
        assert_eq!(vcpus_from_size("Standard_B2ms"), Some(2));
        assert_eq!(vcpus_from_size("Standard_M128"), Some(128));
        assert_eq!(vcpus_from_size("Standard_A0"), Some(0));
        assert_eq!(vcpus_from_size("CustomSize"), None);
    }

    #[test]
    fn test_map_vm_record() {
        let record: VmRecord = serde_json::from_str(
            r#"{
                "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/web1",
                "name": "web1",
                "location": "westeurope",
                "properties": {
                    "hardwareProfile": {"vmSize": "Standard_D4as_v5"},
                    "storageProfile": {"osDisk": {"osType": "Windows"}},
                    "priority": "Spot",
                    "instanceView": {
                        "statuses": [
                            {"code": "ProvisioningState/succeeded"},
                            {"code": "PowerState/running"}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let resource = ArmInventoryCollector::map_vm(record).unwrap();
        match resource {
            Resource::VirtualMachine(vm) => {
                assert_eq!(vm.name, "web1");
                assert_eq!(vm.os, OsKind::Windows);
                assert_eq!(vm.current_option, PurchaseOption::Spot);
                assert_eq!(vm.vcpus, Some(4));
                assert!(vm.hybrid_benefit_eligible);
                assert_eq!(vm.power_state.as_deref(), Some("running"));
            }
            _ => panic!("expected a virtual machine"),
        }
    }

    #[test]
    fn test_map_vm_power_state_from_instance_view() {
        let record: VmRecord = serde_json::from_str(
            r#"{
                "id": "/vm", "name": "vm", "location": "eastus",
                "properties": {
                    "hardwareProfile": {"vmSize": "Standard_D2s_v3"},
                    "instanceView": {
                        "statuses": [{"code": "PowerState/deallocated"}]
                    }
                }
            }"#,
        )
        .unwrap();
        match ArmInventoryCollector::map_vm(record).unwrap() {
            Resource::VirtualMachine(vm) => {
                assert_eq!(vm.power_state.as_deref(), Some("deallocated"));
            }
            _ => panic!("expected a virtual machine"),
        }
    }

    #[test]
    fn test_map_vm_without_instance_view_has_no_power_state() {
        let record: VmRecord = serde_json::from_str(
            r#"{
                "id": "/vm", "name": "vm", "location": "eastus",
                "properties": {
                    "hardwareProfile": {"vmSize": "Standard_D2s_v3"}
                }
            }"#,
        )
        .unwrap();
        match ArmInventoryCollector::map_vm(record).unwrap() {
            Resource::VirtualMachine(vm) => assert!(vm.power_state.is_none()),
            _ => panic!("expected a virtual machine"),
        }
    }

    #[test]
    fn test_map_vm_with_ahb_already_applied_not_eligible() {
        let record: VmRecord = serde_json::from_str(
            r#"{
                "id": "/vm", "name": "vm", "location": "eastus",
                "properties": {
                    "hardwareProfile": {"vmSize": "Standard_D2s_v3"},
                    "storageProfile": {"osDisk": {"osType": "Windows"}},
                    "licenseType": "Windows_Server"
                }
            }"#,
        )
        .unwrap();
        match ArmInventoryCollector::map_vm(record).unwrap() {
            Resource::VirtualMachine(vm) => assert!(!vm.hybrid_benefit_eligible),
            _ => panic!("expected a virtual machine"),
        }
    }

    #[test]
    fn test_map_vm_without_size_is_skipped() {
        let record: VmRecord = serde_json::from_str(
            r#"{"id": "/vm", "name": "vm", "location": "eastus", "properties": {}}"#,
        )
        .unwrap();
        assert!(ArmInventoryCollector::map_vm(record).is_none());
    }

    #[test]
    fn test_map_disk_record() {
        let record: DiskRecord = serde_json::from_str(
            r#"{
                "id": "/disk1",
                "name": "disk1",
                "location": "westeurope",
                "sku": {"name": "Premium_LRS"},
                "properties": {"diskSizeGB": 128}
            }"#,
        )
        .unwrap();
        match ArmInventoryCollector::map_disk(record).unwrap() {
            Resource::ManagedDisk(disk) => {
                assert_eq!(disk.family, DiskFamily::PremiumSsd);
                assert_eq!(disk.size_gib, 128);
            }
            _ => panic!("expected a managed disk"),
        }
    }

    #[test]
    fn test_map_disk_unknown_family_is_skipped() {
        let record: DiskRecord = serde_json::from_str(
            r#"{
                "id": "/disk1", "name": "disk1", "location": "westeurope",
                "sku": {"name": "UltraSSD_LRS"},
                "properties": {"diskSizeGB": 512}
            }"#,
        )
        .unwrap();
        assert!(ArmInventoryCollector::map_disk(record).is_none());
    }
}
