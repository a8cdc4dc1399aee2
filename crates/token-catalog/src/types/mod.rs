pub mod price_feed;
pub mod reference;

use serde::de::DeserializeOwned;

/// Decode each element of a JSON array independently, dropping the ones
/// that do not fit `T`. `what` names the element kind in the log line.
pub(crate) fn decode_lenient<T: DeserializeOwned>(
    values: Vec<serde_json::Value>,
    what: &'static str,
) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping unrecognized {what}");
                None
            }
        })
        .collect()
}
