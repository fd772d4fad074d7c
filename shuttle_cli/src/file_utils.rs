use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use shuttle_dispatch::json::request::JsonOptimizeRequest;

pub fn read_request(path: &Path) -> Result<JsonOptimizeRequest, anyhow::Error> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Cannot parse {}", path.display()))
}
