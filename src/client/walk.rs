//! Column-aligned table walk.

use std::collections::BTreeMap;

use tracing::instrument;

use super::Client;
use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::schema::FieldSpec;
use crate::snapshot::{FieldValue, Record, RowIndex};
use crate::transport::Transport;
use crate::value::Value;
use crate::varbind::VarBind;

/// Field name whose value keys the row when no index column is declared.
pub const INDEX_FIELD: &str = "_index";

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkEnd {
    /// Every column finished, or the index column did.
    EndOfTable,
    /// The row cap was reached.
    RowLimit,
    /// The agent answered with an error-status not tied to one column.
    AgentError,
}

/// Per-column cursor.
///
/// Each column is tracked against its own root and finishes on its own,
/// so a short or missing column does not cut the others off.
struct Column<'a> {
    spec: &'a FieldSpec,
    cursor: Oid,
    done: bool,
}

impl<'a> Column<'a> {
    fn new(spec: &'a FieldSpec) -> Self {
        Self {
            spec,
            cursor: spec.oid.clone(),
            done: false,
        }
    }

    /// Check the binding returned for this column and return its row
    /// sub-identifiers, or mark the column finished.
    fn advance(&mut self, vb: &VarBind) -> Option<Vec<u32>> {
        if matches!(vb.value, Value::EndOfMibView) {
            self.done = true;
            return None;
        }
        let suffix = match vb.oid.suffix_after(&self.spec.oid) {
            Some(suffix) if !suffix.is_empty() => suffix.to_vec(),
            _ => {
                self.done = true;
                return None;
            }
        };
        if vb.oid <= self.cursor {
            tracing::warn!(target: "snmp_device::client", { snmp.column = %self.spec.oid, previous = %self.cursor, current = %vb.oid }, "column OID did not increase");
            self.done = true;
            return None;
        }
        self.cursor = vb.oid.clone();
        Some(suffix)
    }
}

/// Bindings collected for one row, keyed later.
#[derive(Default)]
struct PendingRow {
    index: Option<FieldValue>,
    record: Record,
}

impl<T: Transport> Client<T> {
    /// Walk an indexed table, one GETNEXT per step.
    ///
    /// Every unfinished column (the `index` column first, when given) is
    /// requested in the same GETNEXT. A column finishes when it reports
    /// endOfMibView, moves out of its own subtree or stops increasing; the
    /// walk goes on while any column is unfinished. When an `index` column
    /// is given, its end is the end of the table. Bindings are grouped into
    /// rows by the sub-identifiers after their column, so a column that
    /// lacks a row is simply absent from it.
    ///
    /// Rows are keyed by, in order of preference:
    /// 1. the decoded value of the `index` column,
    /// 2. the value of a field named `_index`,
    /// 3. the last sub-identifier of the row.
    ///
    /// An error-status whose error-index names one binding finishes that
    /// column; v1 agents answer noSuchName there at the end of a column.
    /// A PDU-wide error-status ends the walk with the rows collected so
    /// far. Transport failures are returned.
    #[instrument(skip(self, fields, index), err, fields(snmp.target = %self.peer_addr(), snmp.column_count = fields.len() + usize::from(index.is_some())))]
    pub async fn table_walk(
        &self,
        fields: &[FieldSpec],
        index: Option<&FieldSpec>,
    ) -> Result<BTreeMap<RowIndex, Record>> {
        let has_index = index.is_some();
        let mut columns: Vec<Column<'_>> = index.into_iter().chain(fields).map(Column::new).collect();
        let mut pending: BTreeMap<Vec<u32>, PendingRow> = BTreeMap::new();
        let max_rows = self.inner.config.max_rows;

        let end = loop {
            if pending.len() >= max_rows {
                break WalkEnd::RowLimit;
            }
            if has_index && columns[0].done {
                break WalkEnd::EndOfTable;
            }
            let live: Vec<usize> = (0..columns.len()).filter(|&i| !columns[i].done).collect();
            if live.is_empty() {
                break WalkEnd::EndOfTable;
            }

            let cursors: Vec<Oid> = live.iter().map(|&i| columns[i].cursor.clone()).collect();
            let varbinds = match self.get_next_many(&cursors).await {
                Ok(varbinds) => varbinds,
                Err(e) => match *e {
                    Error::Snmp {
                        status, index: failed, ref oid, ..
                    } => {
                        // v1 agents answer noSuchName for a column past the end of the view
                        let position = (failed as usize).checked_sub(1);
                        if let Some(&column) = position.and_then(|p| live.get(p)) {
                            tracing::debug!(target: "snmp_device::client", { snmp.column = %columns[column].spec.oid, snmp.error_status = %status }, "column finished by error-status");
                            columns[column].done = true;
                            continue;
                        }
                        tracing::warn!(target: "snmp_device::client", { snmp.target = %self.peer_addr(), snmp.error_status = %status, snmp.error_index = failed, snmp.oid = ?oid }, "agent rejected GETNEXT");
                        break WalkEnd::AgentError;
                    }
                    _ => return Err(e),
                },
            };

            for (&position, vb) in live.iter().zip(&varbinds) {
                let column = &mut columns[position];
                let Some(suffix) = column.advance(vb) else {
                    tracing::trace!(target: "snmp_device::client", { snmp.column = %column.spec.oid }, "column finished");
                    continue;
                };
                if vb.value.is_exception() {
                    continue;
                }
                let value = column.spec.decode.decode(&vb.value);
                let row = pending.entry(suffix).or_default();
                if has_index && position == 0 {
                    row.index = Some(value);
                } else {
                    row.record.insert(column.spec.name, value);
                }
            }
        };

        let mut rows = BTreeMap::new();
        for (suffix, row) in pending {
            let (key, record) = key_row(&suffix, row);
            if rows.insert(key.clone(), record).is_some() {
                tracing::debug!(target: "snmp_device::client", { row = %key }, "duplicate row index, keeping the later row");
            }
        }

        tracing::debug!(target: "snmp_device::client", { snmp.target = %self.peer_addr(), rows = rows.len(), ?end }, "table walk complete");
        if end == WalkEnd::RowLimit {
            tracing::warn!(target: "snmp_device::client", { snmp.target = %self.peer_addr(), max_rows }, "table walk stopped at row limit");
        }
        Ok(rows)
    }
}

/// Pick the key for a collected row. The field used as the key is not
/// kept in the record.
fn key_row(suffix: &[u32], row: PendingRow) -> (RowIndex, Record) {
    let PendingRow { index, mut record } = row;
    let key = index
        .or_else(|| record.remove(INDEX_FIELD))
        .map(|value| RowIndex::from_field(&value))
        .unwrap_or_else(|| RowIndex::Number(i64::from(suffix.last().copied().unwrap_or(0))));
    (key, record)
}
