// Reshaping of the raw report grids into structured blocks
use super::error::{FrictionError, Result};
use super::sample::MeasurementSample;

/// One extracted table region: rows of cells, blank cells are empty strings
pub type Grid = Vec<Vec<String>>;

const SAMPLE_TRAILER_ROWS: usize = 3;
const MICRO_SIGN: char = 'µ';

/// Ordered label/value pairs of the report header
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderBlock {
    fields: Vec<(String, String)>,
}

impl HeaderBlock {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The single row of the result summary, keyed by column header
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryBlock {
    columns: Vec<String>,
    values: Vec<String>,
}

impl SummaryBlock {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn column(grid: &Grid, index: usize) -> impl Iterator<Item = &str> {
    grid.iter().map(move |row| cell(row, index))
}

/// Header grid: two label/value column pairs laid out side by side.
pub fn parse_header(grid: &Grid, source_name: &str) -> Result<HeaderBlock> {
    // Labels and values are filtered independently; the source pads them unevenly
    let labels: Vec<&str> = column(grid, 0)
        .chain(column(grid, 2))
        .filter(|c| !c.is_empty())
        .collect();
    let values: Vec<&str> = column(grid, 1)
        .chain(column(grid, 3))
        .filter(|c| !c.is_empty())
        .collect();

    if labels.len() != values.len() {
        return Err(FrictionError::parse(
            source_name,
            format!(
                "header block has {} labels but {} values",
                labels.len(),
                values.len()
            ),
        ));
    }

    let fields = labels
        .into_iter()
        .zip(values)
        .map(|(l, v)| (l.to_string(), v.to_string()))
        .collect();
    Ok(HeaderBlock { fields })
}

/// Summary grid: header row followed by a single value row.
pub fn parse_summary(grid: &Grid, source_name: &str) -> Result<SummaryBlock> {
    let (header, values) = match grid.as_slice() {
        [header, values, ..] => (header, values),
        _ => {
            return Err(FrictionError::parse(
                source_name,
                format!("summary block needs 2 rows, found {}", grid.len()),
            ));
        }
    };
    if header.len() < 5 {
        return Err(FrictionError::parse(
            source_name,
            format!("summary block needs at least 5 columns, found {}", header.len()),
        ));
    }

    let mut columns = header.clone();
    columns[3] = "Fric. C".to_string();
    columns[4] = columns[4].replace("Fric. C ", "");

    let values = (0..columns.len())
        .map(|i| cell(values, i).replace(MICRO_SIGN, ""))
        .collect();

    Ok(SummaryBlock { columns, values })
}

/// Sample grids: stacked blocks with a "Distance | Friction | Speed" header
/// somewhere inside and three trailer rows at the end.
pub fn parse_samples(grids: &[Grid], source_name: &str) -> Result<Vec<MeasurementSample>> {
    let rows: Vec<&Vec<String>> = grids.iter().flatten().collect();

    let header_index = rows
        .iter()
        .position(|row| cell(row, 0) == "Distance" && cell(row, 1) == "Friction")
        .ok_or_else(|| FrictionError::parse(source_name, "sample header row not found"))?;

    let end = rows.len().saturating_sub(SAMPLE_TRAILER_ROWS);
    let body = rows.get(header_index + 1..end).unwrap_or(&[]);

    body.iter()
        .enumerate()
        .map(|(i, row)| {
            let line = header_index + 1 + i;
            let distance = parse_int(cell(row, 0), "Distance", line, source_name)?;
            let friction = cell(row, 1)
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .ok_or_else(|| {
                    FrictionError::parse(
                        source_name,
                        format!("row {line}: Friction '{}' is not a number", cell(row, 1)),
                    )
                })?;
            let speed = parse_int(cell(row, 2), "Speed", line, source_name)?;
            Ok(MeasurementSample::new(distance, friction, speed))
        })
        .collect()
}

fn parse_int(value: &str, field: &str, line: usize, source_name: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        FrictionError::parse(
            source_name,
            format!("row {line}: {field} '{value}' is not an integer"),
        )
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Grid;

    pub fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    pub fn header_grid(configuration: &str, date: &str) -> Grid {
        grid(&[
            &["Configuration", configuration, "Location", "ASFT"],
            &["Date and Time", date, "Tyre Type", "ASTM"],
            &["Type", "ICAO", "Tyre Pressure", "2.1"],
            &["Equipment", "SFT0148", "Water Film", "ON"],
            &["Pilot", "SUPER", "Average Speed", "66"],
            &["Ice Level", "0", "System Distance", "2391.98"],
            &["Runway Length", "2390", "", ""],
        ])
    }

    pub fn summary_grid() -> Grid {
        grid(&[
            &[
                "Runway", "Fric. A", "Fric. B", "", "Fric. C Fric.Max", "Fric.Min", "Fric avg",
                "T. surface", "T. air", "Ice",
            ],
            &[
                "RWY07", "0.68µ", "0.69µ", "0.67µ", "0.77µ", "0.40µ", "0.68µ", "--", "--", "0.00%",
            ],
        ])
    }

    /// Sample block with `frictions.len()` rows, split over two grids.
    pub fn sample_grids(frictions: &[f64]) -> Vec<Grid> {
        let mut first = grid(&[&["ASFT friction report", "", ""], &["Distance", "Friction", "Speed"]]);
        let mut second = Grid::new();
        for (i, f) in frictions.iter().enumerate() {
            let row = vec![
                ((i + 1) * 10).to_string(),
                format!("{f:.2}"),
                (60 + i % 10).to_string(),
            ];
            if i < frictions.len() / 2 {
                first.push(row);
            } else {
                second.push(row);
            }
        }
        second.extend(grid(&[&["Fric avg", "0.68", ""], &["Fric max", "0.77", ""], &["Fric min", "0.40", ""]]));
        vec![first, second]
    }
}
