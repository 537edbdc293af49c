use crate::error::Result;
use crate::models::{Dataset, RawEntries};
use csv::WriterBuilder;
use log::info;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// `{"response": {...}}` wrapper used by exported mock data.
#[derive(Deserialize)]
struct Envelope {
    response: RawEntries,
}

/// Whether `top` is the `response` wrapper rather than a dataset whose only
/// label happens to be `"response"`: the wrapped value maps labels to objects,
/// a point maps field names to scalars.
fn is_envelope(top: &Map<String, Value>) -> bool {
    top.len() == 1
        && top
            .get("response")
            .and_then(Value::as_object)
            .is_some_and(|inner| inner.values().all(Value::is_object))
}

/// Parse a dataset from JSON text.
///
/// Accepts a bare object (`{"<label>": {"id": .., "value_bar": .., "value_area": ..}}`)
/// or the same object wrapped in a `response` field. The shape is decided
/// first, so errors (including duplicate labels) come from that shape.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let top: Map<String, Value> = serde_json::from_str(text)?;
    let RawEntries(entries) = if is_envelope(&top) {
        serde_json::from_str::<Envelope>(text)?.response
    } else {
        serde_json::from_str::<RawEntries>(text)?
    };
    Dataset::from_entries(entries)
}

/// Load a dataset from a JSON file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let dataset = parse_dataset(&text)?;
    info!(
        "loaded {} entries ({} regions) from {}",
        dataset.len(),
        dataset.regions().len(),
        path.display()
    );
    Ok(dataset)
}

/// Save the dataset as CSV with header (`label,id,value_bar,value_area`).
pub fn save_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("label", "id", "value_bar", "value_area"))?;
    for (label, p) in dataset.iter() {
        wtr.serialize((label, &p.id, p.value_bar, p.value_area))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the dataset as a pretty JSON object, labels in dataset order.
pub fn save_json<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(dataset)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartPoint;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let data = Dataset::from_entries([
            ("2023-01-01", ChartPoint::new("Gangnam", 1200.0, 80.5)),
            ("2023-01-02", ChartPoint::new("Nowon", 900.0, 60.0)),
        ])
        .unwrap();
        save_csv(&data, &csvp).unwrap();
        save_json(&data, &jsonp).unwrap();

        let csv_text = fs::read_to_string(&csvp).unwrap();
        assert!(csv_text.starts_with("label,id,value_bar,value_area"));
        assert!(csv_text.contains("2023-01-02,Nowon,900.0,60.0"));

        let back = load_dataset(&jsonp).unwrap();
        assert_eq!(back, data);
    }
}
