use anyhow::Result;
use liquidi_cli::{actions, start::start};

fn main() -> Result<()> {
    let action = start()?;
    actions::handle(action)
}
