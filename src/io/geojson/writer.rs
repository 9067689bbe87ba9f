use std::io::Write;

use crate::error::Result;
use crate::feature::FeatureCollection;

/// Write a FeatureCollection as GeoJSON.
///
/// Note: Does not reproject to WGS84 for you
pub fn write_geojson<W: Write>(collection: &FeatureCollection, writer: W) -> Result<()> {
    let collection = geojson::FeatureCollection::from(collection);
    serde_json::to_writer(writer, &collection)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::geojson::read_geojson;
    use crate::test::point;
    use std::io::BufWriter;

    #[test]
    fn test_write() {
        let collection = point::two_points();

        let mut output_buffer = Vec::new();
        let writer = BufWriter::new(&mut output_buffer);
        write_geojson(&collection, writer).unwrap();

        let output: serde_json::Value = serde_json::from_slice(&output_buffer).unwrap();
        assert_eq!(output["type"], "FeatureCollection");
        assert_eq!(output["features"][1]["properties"]["name"], "p1");

        assert_eq!(read_geojson(output_buffer.as_slice()).unwrap(), collection);
    }
}
