use std::fs;

fn main() {
    // The VERSION file is the single source of truth for release tooling;
    // Cargo.toml must agree with it.
    let version_file = fs::read_to_string("VERSION")
        .expect("VERSION file missing - create it with: echo '0.1.0' > VERSION");

    let version = version_file.trim();
    let cargo_version = env!("CARGO_PKG_VERSION");

    if version != cargo_version {
        panic!(
            "\n\n\
            ❌ VERSION file ({}) disagrees with Cargo.toml ({}).\n\
            Bump both files to the same release before building.\n\n",
            version, cargo_version
        );
    }

    println!("cargo:rerun-if-changed=VERSION");
}
