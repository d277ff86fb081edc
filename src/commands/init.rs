use crate::config::{ClassificationTables, ParamKey, CONFIG_FILE_NAME};
use crate::io::FileSystem;
use anyhow::Result;
use std::path::Path;

/// Render the default configuration, tables included, as TOML.
pub fn default_config_toml() -> String {
    let tables = ClassificationTables::default();
    let mut out = String::from(
        "# rule-reorder configuration\n\
         \n\
         [layout]\n\
         header_indent = 12\n\
         param_indent = 16\n\
         \n\
         [policy]\n\
         # \"drop\" leaves unclassified parameters out; \"keep\" emits them last\n\
         unclassified = \"drop\"\n\
         strict = false\n",
    );
    write_table(&mut out, "parametric", &tables.parametric);
    out.push_str("\n# Ghost parameters are emitted in this order\n");
    write_table(&mut out, "ghost", &tables.ghost);
    out
}

fn write_table(out: &mut String, label: &str, keys: &[ParamKey]) {
    for key in keys {
        out.push_str(&format!("\n[[{}]]\nname = \"{}\"\n", label, key.name));
        if let Some(ty) = &key.ty {
            out.push_str(&format!("type = \"{}\"\n", ty));
        }
    }
}

pub fn init_config<F: FileSystem + ?Sized>(fs: &F, dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if fs.exists(&config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs.write_atomic(&config_path, &default_config_toml())?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
