use crate::{error::Result, types::AreaRecord};

use std::{
    fmt::{Display, Formatter},
    io::Write,
};

use csv::{Terminator, WriterBuilder};

const UTF8_BOM: &str = "\u{feff}";

/// Summary statistics of the protected areas, in the order they are printed.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaReport {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub largest: AreaRecord,
    pub smallest: AreaRecord,
    pub top: Vec<AreaRecord>,
}

impl AreaReport {
    /// Returns `None` when there are no records to summarise.
    pub fn from_records(records: &[AreaRecord], top_count: usize) -> Option<AreaReport> {
        let largest = records
            .iter()
            .reduce(|best, r| if r.magnitude > best.magnitude { r } else { best })?;
        let smallest = records
            .iter()
            .reduce(|best, r| if r.magnitude < best.magnitude { r } else { best })?;

        let total = records.iter().map(|r| r.magnitude).sum::<f64>();

        Some(AreaReport {
            count: records.len(),
            total,
            mean: total / records.len() as f64,
            largest: largest.clone(),
            smallest: smallest.clone(),
            top: largest_first(records).into_iter().take(top_count).collect(),
        })
    }
}

impl Display for AreaReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(70);

        writeln!(f, "{}", rule)?;
        writeln!(f, "STATISTICS")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Protected areas: {}", self.count)?;
        writeln!(f, "Total area:      {} km²", group_thousands(self.total))?;
        writeln!(f, "Mean area:       {} km²", group_thousands(self.mean))?;
        writeln!(
            f,
            "Largest area:    {} km²",
            group_thousands(self.largest.magnitude)
        )?;
        writeln!(f, "    -> {}", self.largest.identifier)?;
        writeln!(
            f,
            "Smallest area:   {} km²",
            group_thousands(self.smallest.magnitude)
        )?;
        writeln!(f, "    -> {}", self.smallest.identifier)?;

        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "TOP {} LARGEST PROTECTED AREAS", self.top.len())?;
        writeln!(f, "{}", rule)?;

        for (rank, record) in self.top.iter().enumerate() {
            writeln!(
                f,
                "{:2}. {:30} {:7.0} km²  ({:.2}°N, {:.2}°E)",
                rank + 1,
                record.identifier,
                record.magnitude,
                record.latitude,
                record.longitude
            )?;
        }

        Ok(())
    }
}

/// Records sorted by magnitude, largest first. Ties keep their input order.
pub fn largest_first(records: &[AreaRecord]) -> Vec<AreaRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.magnitude.total_cmp(&a.magnitude));
    sorted
}

/// Writes `name,area_km2,latitude,longitude` rows, prefixed by a UTF-8 byte
/// order mark so spreadsheet tools pick the right encoding.
pub fn write_csv<W: Write>(records: &[AreaRecord], mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM.as_bytes())?;

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(["name", "area_km2", "latitude", "longitude"])?;

    for record in records {
        writer.write_record([
            record.identifier.clone(),
            record.magnitude.to_string(),
            record.latitude.to_string(),
            record.longitude.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

// 12345.678 -> "12,345.68"
fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_protected_areas;

    #[test]
    fn report_finds_extremes() {
        let report = AreaReport::from_records(&sample_protected_areas(), 10).unwrap();

        assert_eq!(report.count, 25);
        assert_eq!(report.total, 9598.0);
        assert_eq!(report.largest.identifier, "VQG Yok Đôn");
        assert_eq!(report.smallest.identifier, "VQG Xuân Thủy");
        assert_eq!(report.top.len(), 10);
        assert_eq!(report.top[0].magnitude, 1156.0);
        assert_eq!(report.top[1].identifier, "VQG Pù Mát");

        assert!(report.top.windows(2).all(|w| w[0].magnitude >= w[1].magnitude));
    }

    #[test]
    fn report_of_nothing_is_none() {
        assert!(AreaReport::from_records(&[], 10).is_none());
    }

    #[test]
    fn report_renders_every_top_entry() {
        let report = AreaReport::from_records(&sample_protected_areas(), 3).unwrap();
        let text = report.to_string();

        assert!(text.contains("Protected areas: 25"));
        assert!(text.contains("Total area:      9,598.00 km²"));
        assert!(text.contains(" 1. VQG Yok Đôn"));
        assert!(text.contains(" 3. VQG Phong Nha-Kẻ Bàng"));
        assert!(!text.contains(" 4. "));
    }

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(0.0), "0.00");
        assert_eq!(group_thousands(374.12), "374.12");
        assert_eq!(group_thousands(9598.0), "9,598.00");
        assert_eq!(group_thousands(1234567.891), "1,234,567.89");
        assert_eq!(group_thousands(-1000.0), "-1,000.00");
    }

    #[test]
    fn csv_has_bom_header_and_quoting() {
        let records = vec![
            AreaRecord::new("VQG Ba Bể", 22.25, 105.62, 100.0),
            AreaRecord::new("Park, \"North\"", 1.5, 2.5, 7.25),
        ];

        let mut out = Vec::new();
        write_csv(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with('\u{feff}'));
        assert!(!text.contains('\r'));

        let lines = text.trim_start_matches('\u{feff}').lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "name,area_km2,latitude,longitude",
                "VQG Ba Bể,100,22.25,105.62",
                "\"Park, \"\"North\"\"\",7.25,1.5,2.5",
            ]
        );
    }
}
