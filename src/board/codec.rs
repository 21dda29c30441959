//! Wire format of the serialized creative selection.
//!
//! Two shapes exist in stored data:
//!
//! * `{"templateIds":"1,4","quantities":"2,1"}` for a non-empty selection;
//! * `[]`, the legacy placeholder meaning "no items".
//!
//! Decoding never fails: anything that is not the first shape decodes to an
//! empty list.

use serde::Serialize;
use serde_json::Value;

use crate::board::selection::SelectedCreativeItem;
use crate::domain::creative::TemplateCatalog;
use crate::domain::types::CreativeTemplateId;
use crate::domain::work_entry::CreativeItem;

/// Encoding of an empty selection, kept for compatibility with stored rows.
pub const EMPTY_SELECTION: &str = "[]";

const TEMPLATE_IDS_FIELD: &str = "templateIds";
const QUANTITIES_FIELD: &str = "quantities";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SerializedSelection {
    template_ids: String,
    quantities: String,
}

/// Serializes the selection, preserving item order.
pub fn encode(items: &[SelectedCreativeItem]) -> String {
    if items.is_empty() {
        return EMPTY_SELECTION.to_string();
    }

    let selection = SerializedSelection {
        template_ids: join(items.iter().map(|item| item.template_id.to_string())),
        quantities: join(items.iter().map(|item| item.quantity.to_string())),
    };

    serde_json::to_string(&selection).unwrap_or_else(|err| {
        log::error!("Failed to serialize creative selection: {err}");
        EMPTY_SELECTION.to_string()
    })
}

/// Decodes a serialized selection, resolving names against `catalog`.
///
/// Ids are zipped with quantities by position; a missing or non-numeric
/// quantity counts as zero, unparseable ids are dropped.
pub fn decode(raw: &str, catalog: &TemplateCatalog) -> Vec<CreativeItem> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            log::debug!("Ignoring malformed creative selection {raw:?}: {err}");
            return Vec::new();
        }
    };

    let (Some(ids), Some(quantities)) = (
        field_text(&value, TEMPLATE_IDS_FIELD),
        field_text(&value, QUANTITIES_FIELD),
    ) else {
        return Vec::new();
    };

    let quantities: Vec<&str> = quantities.split(',').collect();

    ids.split(',')
        .enumerate()
        .filter_map(|(index, id)| {
            let template_id = match id.parse::<CreativeTemplateId>() {
                Ok(template_id) => template_id,
                Err(_) => {
                    if !id.trim().is_empty() {
                        log::debug!("Skipping creative with invalid template id {id:?}");
                    }
                    return None;
                }
            };
            let quantity = quantities
                .get(index)
                .and_then(|q| q.trim().parse::<u32>().ok())
                .unwrap_or(0);

            Some(CreativeItem {
                template_id,
                name: catalog.name_of(template_id).to_string(),
                quantity,
            })
        })
        .collect()
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(",")
}

/// Reads a comma-joined field; numbers are tolerated for single-item selections.
fn field_text(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
