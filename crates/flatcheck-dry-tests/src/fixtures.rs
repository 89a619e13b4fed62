// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canned provider states used across test suites.

use crate::state::{FlatMapBuilder, ModuleStateBuilder};
use flatcheck_core::{FlatMap, ModuleState};

/// Name of the hosts data source in [`hosts_data_source`].
pub const HOSTS_DATA_SOURCE: &str = "data.xenorchestra_hosts.hosts";

/// Name of the VM resource in [`vm_with_disks`].
pub const VM_RESOURCE: &str = "xenorchestra_vm.vm";

/// Hosts data source whose `name_label`s are *not* ascending by index:
/// `R620-L1`, `R620-L3`, `R620-L2`.
pub fn hosts_data_source() -> FlatMap {
    FlatMapBuilder::new()
        .attr("id", "0aea61f4-c9d1-4060-94e8-4eb2024d082c")
        .object_list(
            "hosts",
            &[
                &[("name_label", "R620-L1"), ("id", "h-1")],
                &[("name_label", "R620-L3"), ("id", "h-3")],
                &[("name_label", "R620-L2"), ("id", "h-2")],
            ],
        )
        .attr("sort_by", "name_label")
        .attr("sort_order", "asc")
        .build()
}

/// VM with a disk set, a network list and tags, plus the hosts data source
/// and a network resource the VM refers to.
pub fn vm_with_disks() -> ModuleState {
    let vm = FlatMapBuilder::new()
        .attr("id", "vm-77")
        .attr("name_label", "web-1")
        .attr("power_state", "Running")
        .set("tags", ["web", "prod"])
        .object_set(
            "disk",
            &[
                &[("name_label", "root"), ("size", "10737418240"), ("attached", "true")],
                &[("name_label", "data"), ("size", "53687091200"), ("attached", "false")],
            ],
        )
        .object_list(
            "network",
            &[
                &[("network_id", "net-a"), ("device", "0"), ("mac_address", "")],
                &[("network_id", "net-b"), ("device", "1")],
            ],
        )
        .build();
    let net = FlatMapBuilder::new()
        .attr("id", "net-b")
        .attr("name_label", "storage")
        .build();
    ModuleStateBuilder::new()
        .resource(VM_RESOURCE, vm)
        .resource("xenorchestra_network.storage", net)
        .resource(HOSTS_DATA_SOURCE, hosts_data_source())
        .pending("xenorchestra_vm.pending")
        .build()
}
