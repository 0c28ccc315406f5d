// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::required;
use crate::app::SecureFin;

pub fn handle(app: &SecureFin, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    let blocks = app.blocks()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "index",
                "timestamp",
                "type",
                "category",
                "amount",
                "description",
                "receiver",
                "previous_hash",
                "hash",
            ])?;
            for b in blocks {
                wtr.write_record([
                    b.index.to_string(),
                    b.timestamp.to_string(),
                    b.data.r#type.to_string(),
                    b.data.category.to_string(),
                    b.data.amount.to_string(),
                    b.data.description.clone(),
                    b.data.receiver.clone().unwrap_or_default(),
                    b.previous_hash.clone(),
                    b.hash.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(blocks)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} blocks to {}", blocks.len(), out);
    Ok(())
}
