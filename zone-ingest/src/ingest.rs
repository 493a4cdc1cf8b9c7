use std::path::Path;

use metrics::counter;
use tracing::warn;

use zone_match::RawZone;

use crate::error::IngestError;

const REQUIRED_COLUMNS: [&str; 4] = ["location_id", "region", "name", "sub_class"];

/// Read the zone reference file from disk. See [`parse_zones`].
pub fn load_zone_file(path: &Path) -> Result<Vec<RawZone>, IngestError> {
    let csv_data = std::fs::read_to_string(path)?;
    parse_zones(&csv_data)
}

/// Parse zone rows out of CSV data.
///
/// Header names are trimmed and lowercased before matching, so upstream
/// exports may vary casing freely; all of `location_id`, `region`, `name`
/// and `sub_class` must be present or the whole file is rejected. Rows with
/// an unparsable `location_id` or a blank `region`/`name` are dropped and
/// logged; field values are kept exactly as written (the engine decides
/// what whitespace means).
pub fn parse_zones(csv_data: &str) -> Result<Vec<RawZone>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            missing,
            found: headers,
        });
    }

    let idx = |name: &str| headers.iter().position(|h| h == name).unwrap();
    let location_id_idx = idx("location_id");
    let region_idx = idx("region");
    let name_idx = idx("name");
    let sub_class_idx = idx("sub_class");

    let mut rows = Vec::new();
    let mut dropped = 0u64;

    for (line, record) in reader.records().enumerate() {
        let record = record?;

        let raw_id = record.get(location_id_idx).unwrap_or("").trim();
        let region = record.get(region_idx).unwrap_or("");
        let name = record.get(name_idx).unwrap_or("");
        let sub_class = record.get(sub_class_idx).unwrap_or("");

        let location_id = match raw_id.parse::<i32>() {
            Ok(id) => id,
            Err(_) => {
                warn!(line = line + 2, raw_id, "dropping row without a usable location_id");
                dropped += 1;
                continue;
            }
        };

        if region.trim().is_empty() || name.trim().is_empty() {
            warn!(line = line + 2, location_id, "dropping row with blank region or name");
            dropped += 1;
            continue;
        }

        rows.push(RawZone {
            location_id,
            region: region.to_string(),
            name: name.to_string(),
            sub_class: sub_class.to_string(),
        });
    }

    counter!("zone_ingest_rows_dropped_total").increment(dropped);
    counter!("zone_ingest_rows_loaded_total").increment(rows.len() as u64);

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_rows() {
        let csv = "\
location_id,region,name,sub_class
1,BROOKLYN,Williamsburg,Boro Zone
2,QUEENS,Astoria,Boro Zone
";
        let rows = parse_zones(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location_id, 1);
        assert_eq!(rows[0].region, "BROOKLYN");
        assert_eq!(rows[1].name, "Astoria");
    }

    #[test]
    fn headers_match_case_insensitively() {
        let csv = "\
Location_ID, REGION ,Name,Sub_Class
1,BROOKLYN,Williamsburg,Boro Zone
";
        let rows = parse_zones(csv).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_columns_reject_the_whole_file() {
        let csv = "\
location_id,region,name
1,BROOKLYN,Williamsburg
";
        match parse_zones(csv) {
            Err(IngestError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["sub_class".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn rows_without_usable_fields_are_dropped() {
        let csv = "\
location_id,region,name,sub_class
1,BROOKLYN,Williamsburg,Boro Zone
oops,BROOKLYN,Greenpoint,Boro Zone
3,,Bushwick,Boro Zone
4,QUEENS,,Boro Zone
5,QUEENS,Astoria,
";
        let rows = parse_zones(csv).unwrap();
        let ids: Vec<i32> = rows.iter().map(|r| r.location_id).collect();
        // A blank sub_class is fine; blank region/name or a bad id is not.
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn field_values_keep_their_whitespace() {
        let csv = "\
location_id,region,name,sub_class
2,BROOKLYN,Williamsburg ,Boro Zone
";
        let rows = parse_zones(csv).unwrap();
        assert_eq!(rows[0].name, "Williamsburg ");
    }
}
