use std::path::Path;

pub const PROBLEM_EXTENSION: &str = "in";
pub const SOLUTION_EXTENSION: &str = "out";

/// Names of the problems in `folder`, that is the stems of its `.in` files, sorted.
pub fn read_problem_names(folder: &Path) -> Result<Vec<String>, std::io::Error> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file()
            || path.extension().and_then(|extension| extension.to_str())
                != Some(PROBLEM_EXTENSION)
        {
            continue;
        }

        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            names.push(stem.to_string());
        }
    }

    names.sort();

    Ok(names)
}
