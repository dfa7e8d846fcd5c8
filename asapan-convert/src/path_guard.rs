use std::path::Path;

use anyhow::{bail, Context, Result};

/// Refuse destinations the output commit cannot safely replace: the input file
/// itself (under any spelling or through a symlink) or an existing directory.
pub fn ensure_output_not_input(output: &Path, input: &Path) -> Result<()> {
    if !output.exists() {
        return Ok(());
    }
    if output.is_dir() {
        bail!("output {} is a directory", output.display());
    }

    // A missing input is reported when it is read.
    let Ok(in_real) = input.canonicalize() else {
        return Ok(());
    };
    let out_real = output
        .canonicalize()
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;
    if out_real == in_real {
        bail!(
            "refusing to overwrite source file: output {} matches input {}",
            output.display(),
            input.display()
        );
    }
    Ok(())
}
