//! Snapshot retrieval: run a device schema against one agent.

use tracing::instrument;

use crate::client::Client;
use crate::endpoint::DeviceEndpoint;
use crate::error::Result;
use crate::schema::{DeviceSchema, DeviceType, GroupMode, schema_for};
use crate::snapshot::{GroupResult, Snapshot};
use crate::transport::Transport;

/// Fetch every group of `schema`, then run its vendor step.
///
/// Groups are fetched one after another in schema order. The vendor step
/// sees the groups fetched so far; if it asks for extra fields they are
/// fetched with one more GET and merged over its base record, fetched
/// values winning. The first transport failure aborts the whole poll.
#[instrument(skip(client, schema), err, fields(snmp.target = %client.peer_addr(), device_type = %schema.device_type))]
pub async fn retrieve<T: Transport>(client: &Client<T>, schema: &DeviceSchema) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new(schema.device_type);

    for group in &schema.groups {
        tracing::debug!(target: "snmp_device::retriever", { group = group.name, field_count = group.fields.len() }, "fetching group");
        let result = match &group.mode {
            GroupMode::Scalar => GroupResult::Scalar(client.scalar_get(&group.fields).await?),
            GroupMode::IndexedTable { index } => {
                GroupResult::Table(client.table_walk(&group.fields, index.as_ref()).await?)
            }
        };
        snapshot.groups.insert(group.name.to_owned(), result);
    }

    if let Some(vendor_step) = schema.vendor_step {
        let lookup = vendor_step(&snapshot);
        let mut additional_info = lookup.base;
        if !lookup.fields.is_empty() {
            tracing::debug!(target: "snmp_device::retriever", { field_count = lookup.fields.len() }, "fetching vendor fields");
            additional_info.merge(client.scalar_get(&lookup.fields).await?);
        }
        snapshot.additional_info = additional_info;
    }

    tracing::debug!(target: "snmp_device::retriever", { groups = snapshot.groups.len(), additional_info = snapshot.additional_info.len() }, "snapshot complete");
    Ok(snapshot)
}

/// Connect to `endpoint` over UDP and retrieve one snapshot.
///
/// ```rust,no_run
/// use snmp_device::{DeviceEndpoint, DeviceType, poll};
///
/// # async fn example() -> snmp_device::Result<()> {
/// let snapshot = poll(&DeviceEndpoint::new("192.168.1.20"), DeviceType::Printer).await?;
/// if let Some(supplies) = snapshot.table("supplies") {
///     println!("{} supplies", supplies.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn poll(endpoint: &DeviceEndpoint, device_type: DeviceType) -> Result<Snapshot> {
    let client = Client::connect(endpoint).await?;
    retrieve(&client, &schema_for(device_type)).await
}
