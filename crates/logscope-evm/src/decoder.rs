//! `EventDecoder`: decodes a classified log against its fixed field schema.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use indexmap::IndexMap;
use logscope_core::{
    DecodeError, DecodeOutcome, DecodedEvent, EventKind, EventSchema, FieldDef, FieldType,
    FieldValue, LogEntry,
};

use crate::classifier;
use crate::normalizer;
use crate::signatures::SignatureRegistry;

/// Stateless decoder over the static signature registry.
/// Thread-safe, cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct EventDecoder {
    registry: &'static SignatureRegistry,
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDecoder {
    pub fn new() -> Self {
        Self {
            registry: SignatureRegistry::global(),
        }
    }

    /// Classify by topic[0], then decode.
    pub fn classify_and_decode(
        &self,
        log: &LogEntry,
    ) -> (EventKind, Result<DecodeOutcome, DecodeError>) {
        let kind = classifier::classify_log(log);
        (kind, self.decode(log, kind))
    }

    /// Decode `log` as an event of `kind`.
    ///
    /// Indexed fields are read from topics[1..] in declaration order
    /// (topics[0] is the signature); the remaining fields are read, in
    /// declaration order, from `data` as one ABI-encoded tuple. Any failure
    /// rejects the whole log.
    pub fn decode(&self, log: &LogEntry, kind: EventKind) -> Result<DecodeOutcome, DecodeError> {
        if kind.is_unknown() {
            return Ok(DecodeOutcome::Unclassified);
        }
        let schema = match self.registry.schema(kind) {
            Some(s) if s.has_fields() => s,
            _ => return Ok(DecodeOutcome::NoSchema(kind)),
        };

        let mut indexed = Vec::new();
        for (i, field) in schema.indexed_fields().into_iter().enumerate() {
            let position = i + 1;
            let topic = log
                .topics
                .get(position)
                .ok_or_else(|| DecodeError::MissingTopic {
                    log_index: log.log_index,
                    kind,
                    field: field.name.clone(),
                    position,
                })?;
            indexed.push(decode_topic(log, kind, position, topic, field.ty)?);
        }

        let data = decode_data(log, kind, &schema.data_fields())?;

        let fields = assemble(schema, indexed, data);
        tracing::debug!(
            log_index = log.log_index,
            kind = %kind,
            fields = fields.len(),
            "decoded log"
        );

        Ok(DecodeOutcome::Decoded(DecodedEvent {
            address: log.address.clone(),
            kind,
            log_index: log.log_index,
            fields,
        }))
    }
}

/// Interleave indexed and data values back into schema declaration order.
fn assemble(
    schema: &EventSchema,
    indexed: Vec<FieldValue>,
    data: Vec<FieldValue>,
) -> IndexMap<String, FieldValue> {
    let mut indexed = indexed.into_iter();
    let mut data = data.into_iter();
    let mut out = IndexMap::new();
    for field in schema.fields.iter().flatten() {
        let value = if field.indexed {
            indexed.next()
        } else {
            data.next()
        };
        if let Some(v) = value {
            out.insert(field.name.clone(), v);
        }
    }
    out
}

/// Decode a single indexed topic (always 32 bytes, ABI-encoded value type).
fn decode_topic(
    log: &LogEntry,
    kind: EventKind,
    position: usize,
    topic_hex: &str,
    ty: FieldType,
) -> Result<FieldValue, DecodeError> {
    let invalid = |reason: String| DecodeError::InvalidTopic {
        log_index: log.log_index,
        kind,
        position,
        reason,
    };

    let bytes = logscope_core::hexbytes::decode(topic_hex)
        .map_err(|e| invalid(format!("invalid topic hex: {e}")))?;
    if bytes.len() != 32 {
        return Err(invalid(format!("expected 32 bytes, got {}", bytes.len())));
    }
    normalizer::check_word(ty, &bytes).map_err(invalid)?;

    normalizer::field_to_dyn(ty)
        .abi_decode(&bytes)
        .map(normalizer::normalize)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            log_index: log.log_index,
            kind,
            reason: format!("topic {position}: {e}"),
        })
}

/// Decode the log data (non-indexed params) as an ABI-encoded tuple.
fn decode_data(
    log: &LogEntry,
    kind: EventKind,
    data_fields: &[&FieldDef],
) -> Result<Vec<FieldValue>, DecodeError> {
    if data_fields.is_empty() {
        return Ok(Vec::new());
    }

    let tuple_type = DynSolType::Tuple(
        data_fields
            .iter()
            .map(|f| normalizer::field_to_dyn(f.ty))
            .collect(),
    );
    let decoded = tuple_type
        .abi_decode_params(&log.data)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            log_index: log.log_index,
            kind,
            reason: format!("data: {e}"),
        })?;

    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        other => vec![other],
    };
    if values.len() != data_fields.len() {
        return Err(DecodeError::AbiDecodeFailed {
            log_index: log.log_index,
            kind,
            reason: format!(
                "data: expected {} values, got {}",
                data_fields.len(),
                values.len()
            ),
        });
    }

    // every schema type is static, so field i is head word i
    for (i, (field, word)) in data_fields.iter().zip(log.data.chunks(32)).enumerate() {
        normalizer::check_word(field.ty, word).map_err(|reason| DecodeError::AbiDecodeFailed {
            log_index: log.log_index,
            kind,
            reason: format!("data word {i} ('{}'): {reason}", field.name),
        })?;
    }

    Ok(values.into_iter().map(normalizer::normalize).collect())
}
