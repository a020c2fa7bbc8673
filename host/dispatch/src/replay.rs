//! Replays a JSON log of script-side GL commands through a [`Dispatcher`].
//!
//! A log is an array of `{"method": "<name>", "args": [...]}` objects. Plain JSON maps onto
//! dynamic values directly. A few tagged objects stand in for values JSON cannot express:
//!
//! - `{"$undefined": null}` is `undefined`.
//! - `{"$bytes": [..]}` is an array buffer.
//! - `{"$f32": [..]}`, `{"$i32": [..]}`, and the other element tags are typed arrays.

use anyhow::Context as _;
use exgl_heap::{HeapRuntime, TypedArrayData, Value};
use serde::Deserialize;
use serde_json::Value as Json;

use crate::{DispatchError, Dispatcher};

#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    pub method: String,
    #[serde(default)]
    pub args: Vec<Json>,
}

pub fn parse_log(source: &str) -> anyhow::Result<Vec<Command>> {
    serde_json::from_str(source).context("malformed command log")
}

pub fn json_to_value(json: &Json) -> anyhow::Result<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(value) => Value::Boolean(*value),
        Json::Number(number) => Value::Number(
            number
                .as_f64()
                .with_context(|| format!("number {number} is not representable"))?,
        ),
        Json::String(value) => Value::string(value.as_str()),
        Json::Array(values) => Value::array(
            values
                .iter()
                .map(json_to_value)
                .collect::<anyhow::Result<Vec<_>>>()?,
        ),
        Json::Object(fields) => {
            if fields.len() == 1
                && let Some((tag, payload)) = fields.iter().next()
                && let Some(tag) = tag.strip_prefix('$')
            {
                return tagged_to_value(tag, payload);
            }

            Value::object(
                fields
                    .iter()
                    .map(|(key, value)| Ok((key.as_str(), json_to_value(value)?)))
                    .collect::<anyhow::Result<Vec<_>>>()?,
            )
        }
    })
}

fn tagged_to_value(tag: &str, payload: &Json) -> anyhow::Result<Value> {
    fn elems(payload: &Json) -> anyhow::Result<Vec<f64>> {
        payload
            .as_array()
            .context("typed payload must be an array")?
            .iter()
            .map(|v| v.as_f64().context("typed payload must hold numbers"))
            .collect()
    }

    macro_rules! typed {
        ($ty:ty) => {
            Value::typed_array(elems(payload)?.into_iter().map(|v| v as $ty).collect::<Vec<_>>())
        };
    }

    Ok(match tag {
        "undefined" => Value::Undefined,
        "bytes" => Value::array_buffer(
            elems(payload)?
                .into_iter()
                .map(|v| v as u8)
                .collect::<Vec<_>>(),
        ),
        "i8" => typed!(i8),
        "u8" => typed!(u8),
        "i16" => typed!(i16),
        "u16" => typed!(u16),
        "i32" => typed!(i32),
        "u32" => typed!(u32),
        "f32" => typed!(f32),
        "f64" => Value::typed_array(TypedArrayData::Float64(elems(payload)?)),
        _ => anyhow::bail!("unknown value tag `${tag}`"),
    })
}

#[derive(Debug, Default)]
pub struct ReplayStats {
    pub queued: usize,
    pub rejected: usize,
}

/// Dispatches every command in order. Commands the dispatcher rejects are logged and skipped the
/// way a script-level exception would skip them. A batch failure aborts the replay.
pub fn replay(
    dispatcher: &mut Dispatcher<HeapRuntime>,
    commands: &[Command],
) -> anyhow::Result<ReplayStats> {
    let rt = HeapRuntime;
    let mut stats = ReplayStats::default();

    for (index, command) in commands.iter().enumerate() {
        let args = command
            .args
            .iter()
            .map(json_to_value)
            .collect::<anyhow::Result<Vec<_>>>()
            .with_context(|| {
                format!("command {index} (`{}`) has invalid arguments", command.method)
            })?;

        match dispatcher.call(&rt, &command.method, &args) {
            Ok(()) => stats.queued += 1,
            Err(DispatchError::Batch(err)) => return Err(err.into()),
            Err(err) => {
                tracing::warn!("command {index} rejected: {err}");
                stats.rejected += 1;
            }
        }
    }

    dispatcher.end_batch()?;

    Ok(stats)
}
