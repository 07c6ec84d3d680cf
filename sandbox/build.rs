use fs_extra::dir::{CopyOptions, copy};
use std::env;
use std::path::{Path, PathBuf};

const SCENES_FOLDER_NAME: &str = "assets";

const OUT_DIRECTORY_UP_LEVEL: usize = 3;

/* Puts the scene collections next to the produced binary, so the sandbox can
be launched from the target folder as well as via cargo run. */
fn main() {
    let copy_source = Path::new(SCENES_FOLDER_NAME);

    let out_directory = env::var("OUT_DIR")
        .expect("failed to retrieve output directory of the build procedure");

    let copy_target = PathBuf::from(out_directory)
        .ancestors()
        .nth(OUT_DIRECTORY_UP_LEVEL)
        .expect("output directory is too shallow")
        .to_path_buf();

    let mut options = CopyOptions::new();
    options.overwrite = true;
    copy(copy_source, copy_target.clone(), &options)
        .unwrap_or_else(|_| panic!("failed to copy folder {copy_source:?} into {copy_target:?}"));
}
