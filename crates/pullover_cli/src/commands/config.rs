use std::path::Path;

use anyhow::Result;

pub fn run(path: Option<&Path>) -> Result<()> {
    let config = super::load_config(path)?;

    match path {
        Some(path) => println!("# {} (valid)", path.display()),
        None => println!("# defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
