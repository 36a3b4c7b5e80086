use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use land_dashboard::data::model::REQUIRED_COLUMNS;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One generated row, with numeric cells as text so some can be malformed.
struct Row {
    account: String,
    owner: String,
    parcel: String,
    nature: String,
    classification: String,
    sub_classification: String,
    extent: String,
}

const OWNERS: [&str; 12] = [
    "Kota Venkata Rao",
    "Pasupuleti Lakshmi",
    "Gajjala Srinivasulu",
    "Shaik Mastan Vali",
    "Bandi Ramanamma",
    "Cheruvu Subba Reddy",
    "Nalluri Anjaiah",
    "Vemula Sarojini",
    "Madala Koteswara Rao",
    "Gram Panchayat Rajupalem",
    "Tummala Padmavathi",
    "Yerra Narasimha",
];
const NATURES: [&str; 5] = ["Patta", "Patta", "Govt. Poramboke", "Govt. Assigned", "Inam"];
const CLASSES: [&str; 3] = ["Wet", "Dry", "Garden"];
const SUB_CLASSES: [&str; 4] = ["Single crop", "Double crop", "Tank fed", ""];

fn generate_rows(rng: &mut SimpleRng, n_parcels: i64) -> Vec<Row> {
    let mut rows = Vec::new();
    for parcel in 1..=n_parcels {
        let extent = ((rng.next_f64() * 4.5 + 0.1) * 100.0).round() / 100.0;
        let nature = rng.pick(&NATURES);
        let classification = rng.pick(&CLASSES);
        let sub_classification = rng.pick(&SUB_CLASSES);

        // roughly one parcel in four is shared by two or three owners
        let holders = match rng.next_u64() % 8 {
            0 => 3,
            1 => 2,
            _ => 1,
        };
        for _ in 0..holders {
            let owner_idx = (rng.next_u64() % OWNERS.len() as u64) as usize;
            rows.push(Row {
                account: (1000 + owner_idx).to_string(),
                owner: OWNERS[owner_idx].to_string(),
                parcel: parcel.to_string(),
                nature: nature.to_string(),
                classification: classification.to_string(),
                sub_classification: sub_classification.to_string(),
                extent: format!("{extent:.2}"),
            });
        }
    }

    // A few rows the loader has to coerce to null.
    rows.push(Row {
        account: "pending".into(),
        owner: "  Unregistered Occupant ".into(),
        parcel: "N/A".into(),
        nature: "Govt. Poramboke".into(),
        classification: "Dry".into(),
        sub_classification: String::new(),
        extent: "unknown".into(),
    });
    rows.push(Row {
        account: String::new(),
        owner: OWNERS[0].into(),
        parcel: (n_parcels + 1).to_string(),
        nature: "Patta".into(),
        classification: "Wet".into(),
        sub_classification: String::new(),
        extent: String::new(),
    });
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(REQUIRED_COLUMNS)?;
    for r in rows {
        writer.write_record([
            &r.account,
            &r.owner,
            &r.parcel,
            &r.nature,
            &r.classification,
            &r.sub_classification,
            &r.extent,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn text_column<'a>(values: impl Iterator<Item = &'a String>) -> ArrayRef {
    Arc::new(StringArray::from(values.map(String::as_str).collect::<Vec<_>>()))
}

fn write_parquet(path: &str, rows: &[Row]) -> Result<()> {
    let int = |s: &String| s.trim().parse::<i64>().ok();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(rows.iter().map(|r| int(&r.account)).collect::<Vec<_>>())),
        text_column(rows.iter().map(|r| &r.owner)),
        Arc::new(Int64Array::from(rows.iter().map(|r| int(&r.parcel)).collect::<Vec<_>>())),
        text_column(rows.iter().map(|r| &r.nature)),
        text_column(rows.iter().map(|r| &r.classification)),
        text_column(rows.iter().map(|r| &r.sub_classification)),
        Arc::new(Float64Array::from(
            rows.iter()
                .map(|r| r.extent.trim().parse::<f64>().ok())
                .collect::<Vec<_>>(),
        )),
    ];
    let types = [
        DataType::Int64,
        DataType::Utf8,
        DataType::Int64,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Utf8,
        DataType::Float64,
    ];
    let schema = Arc::new(Schema::new(
        REQUIRED_COLUMNS
            .iter()
            .zip(types)
            .map(|(name, ty)| Field::new(*name, ty, true))
            .collect::<Vec<_>>(),
    ));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng, 120);

    write_csv("sample_land_records.csv", &rows)?;
    write_parquet("sample_land_records.parquet", &rows)?;

    println!(
        "Wrote {} land records to sample_land_records.csv and sample_land_records.parquet",
        rows.len()
    );
    Ok(())
}
