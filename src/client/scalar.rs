//! Scalar group retrieval.

use tracing::instrument;

use super::Client;
use crate::error::{Error, Result};
use crate::schema::FieldSpec;
use crate::snapshot::Record;
use crate::transport::Transport;

impl<T: Transport> Client<T> {
    /// Fetch every field of a scalar group with one GET.
    ///
    /// When the agent rejects the request with an error-status that names
    /// a binding (v1 `noSuchName` and the like), that field is dropped and
    /// the GET is repeated for the rest, so one missing object never hides
    /// the others. Exception values (`noSuchObject`, `noSuchInstance`,
    /// `endOfMibView`) leave their field out of the record.
    ///
    /// Only transport and framing failures are returned as errors.
    #[instrument(skip(self, fields), err, fields(snmp.target = %self.peer_addr(), snmp.field_count = fields.len()))]
    pub async fn scalar_get(&self, fields: &[FieldSpec]) -> Result<Record> {
        let mut pending: Vec<&FieldSpec> = fields.iter().collect();
        let mut record = Record::new();

        while !pending.is_empty() {
            let oids: Vec<_> = pending.iter().map(|f| f.oid.clone()).collect();
            let varbinds = match self.get_many(&oids).await {
                Ok(varbinds) => varbinds,
                Err(e) => match *e {
                    Error::Snmp {
                        status,
                        index,
                        ref oid,
                        ..
                    } => {
                        let failing = (index as usize)
                            .checked_sub(1)
                            .filter(|&i| i < pending.len());
                        let field = failing.map(|i| pending[i].name);
                        tracing::warn!(target: "snmp_device::client", { snmp.target = %self.peer_addr(), snmp.error_status = %status, snmp.error_index = index, snmp.oid = ?oid, snmp.field = ?field }, "agent rejected GET");
                        match failing {
                            Some(i) => {
                                pending.remove(i);
                                continue;
                            }
                            // The error names no binding; nothing left to narrow.
                            None => break,
                        }
                    }
                    _ => return Err(e),
                },
            };

            for (field, vb) in pending.iter().zip(&varbinds) {
                if vb.value.is_exception() {
                    tracing::debug!(target: "snmp_device::client", { snmp.oid = %vb.oid, snmp.field = field.name, value = %vb.value }, "field not available");
                    continue;
                }
                record.insert(field.name, field.decode.decode(&vb.value));
            }
            break;
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::{Client, ClientConfig};
    use crate::oid;
    use crate::schema::{FieldDecoder, FieldSpec};
    use crate::snapshot::FieldValue;
    use crate::transport::{MockTransport, ResponseBuilder};
    use crate::value::Value;
    use crate::version::Version;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::text("description", oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)),
            FieldSpec::new("uptime", oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), FieldDecoder::Ticks),
            FieldSpec::text("name", oid!(1, 3, 6, 1, 2, 1, 1, 5, 0)),
        ]
    }

    #[tokio::test]
    async fn exception_value_leaves_field_out() {
        let mut mock = MockTransport::new("127.0.0.1:161".parse().unwrap());
        mock.queue_response(
            ResponseBuilder::new(1)
                .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), Value::from("Linux"))
                .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::TimeTicks(500))
                .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::NoSuchObject)
                .build_v2c(b"public"),
        );
        let client = Client::new(mock.clone(), ClientConfig::default());

        let record = client.scalar_get(&fields()).await.unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.field("uptime"), Some(&FieldValue::Ticks(500)));
        assert!(record.field("name").is_none());
    }

    #[tokio::test]
    async fn v1_no_such_name_drops_field_and_retries() {
        let mut mock = MockTransport::new("127.0.0.1:161".parse().unwrap());
        mock.queue_response(
            ResponseBuilder::new(1)
                .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), Value::Null)
                .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::Null)
                .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::Null)
                .error_status(2)
                .error_index(2)
                .build_v1(b"public"),
        );
        mock.queue_response(
            ResponseBuilder::new(2)
                .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), Value::from("Linux"))
                .varbind(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("nas01"))
                .build_v1(b"public"),
        );
        let config = ClientConfig {
            version: Version::V1,
            ..ClientConfig::default()
        };
        let client = Client::new(mock.clone(), config);

        let record = client.scalar_get(&fields()).await.unwrap();
        assert_eq!(record.text("description"), Some("Linux"));
        assert_eq!(record.text("name"), Some("nas01"));
        assert!(record.field("uptime").is_none());

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].oids().len(), 2);
    }

    #[tokio::test]
    async fn pdu_wide_error_yields_empty_record() {
        let mut mock = MockTransport::new("127.0.0.1:161".parse().unwrap());
        mock.queue_response(
            ResponseBuilder::new(1)
                .error_status(5)
                .error_index(0)
                .build_v2c(b"public"),
        );
        let client = Client::new(mock.clone(), ClientConfig::default());

        let record = client.scalar_get(&fields()).await.unwrap();
        assert!(record.is_empty());
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn timeout_aborts() {
        let mut mock = MockTransport::new("127.0.0.1:161".parse().unwrap());
        mock.queue_timeout();
        let client = Client::new(mock.clone(), ClientConfig::default());
        assert!(client.scalar_get(&fields()).await.is_err());
    }
}
