use indexmap::IndexMap;

use crate::data::kind::{infer_column_kind, resolve_column_kind, ColumnKind};
use crate::data::table::DataTable;
use crate::error::XrChartError;
use crate::spec::encoding::{Channel, EncodingSpec};
use crate::spec::mark::MarkType;

/// A channel bound to a column of the transformed table
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChannel {
    pub channel: Channel,
    pub field: String,
    pub kind: ColumnKind,
    pub axis: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedEncoding {
    channels: IndexMap<Channel, ResolvedChannel>,
}

impl ResolvedEncoding {
    pub fn get(&self, channel: Channel) -> Option<&ResolvedChannel> {
        self.channels.get(&channel)
    }

    /// The channel, which must be quantitative when present
    pub fn quantitative(&self, channel: Channel) -> Result<Option<&ResolvedChannel>, XrChartError> {
        match self.channels.get(&channel) {
            Some(resolved) if resolved.kind != ColumnKind::Quantitative => {
                Err(XrChartError::ValidationError(format!(
                    "Channel `{channel}` requires a quantitative field, `{}` is nominal",
                    resolved.field
                )))
            }
            resolved => Ok(resolved),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedChannel> {
        self.channels.values()
    }
}

/// Bind each encoded channel to its column in the transformed table,
/// inferring types and checking the explicit ones
pub fn resolve_encoding(
    encoding: &EncodingSpec,
    mark_type: MarkType,
    table: &DataTable,
) -> Result<ResolvedEncoding, XrChartError> {
    encoding.validate_for(mark_type)?;
    let mut channels = IndexMap::new();
    for (channel, channel_encoding) in encoding.iter() {
        let field = channel_encoding.output_field();
        let inferred = infer_column_kind(table.field(&field)?)?;
        let kind = resolve_column_kind(*channel, &field, channel_encoding.kind, inferred)?;
        channels.insert(
            *channel,
            ResolvedChannel {
                channel: *channel,
                field,
                kind,
                axis: channel_encoding.axis.unwrap_or(true),
            },
        );
    }
    Ok(ResolvedEncoding { channels })
}
