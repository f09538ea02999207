use std::fs;
use std::path::Path;

const SOURCES: &[(&str, &str)] = &[
    ("proto/common/v1/uuid.proto", "src/generated/common.v1.rs"),
    (
        "proto/applications/v1/application.proto",
        "src/generated/applications.v1.rs",
    ),
];

const DESCRIPTOR_SET: &str = "src/descriptor.rs";

fn warn_if_stale(proto: &Path, artifact: &Path, what: &str) {
    if let (Ok(proto_meta), Ok(artifact_meta)) = (fs::metadata(proto), fs::metadata(artifact)) {
        if let (Ok(proto_mtime), Ok(artifact_mtime)) =
            (proto_meta.modified(), artifact_meta.modified())
        {
            if proto_mtime > artifact_mtime {
                println!(
                    "cargo:warning=proto '{}' is newer than {} '{}'",
                    proto.display(),
                    what,
                    artifact.display()
                );
            }
        }
    }
}

fn main() {
    let descriptor_set = Path::new(DESCRIPTOR_SET);
    println!("cargo:rerun-if-changed={}", descriptor_set.display());

    for (proto, generated) in SOURCES {
        let proto = Path::new(proto);
        let generated = Path::new(generated);

        println!("cargo:rerun-if-changed={}", proto.display());
        println!("cargo:rerun-if-changed={}", generated.display());

        if !generated.exists() {
            panic!(
                "missing generated prost source '{}'; commit generated artifacts",
                generated.display()
            );
        }

        warn_if_stale(proto, generated, "generated Rust stubs");
        warn_if_stale(proto, descriptor_set, "descriptor set");
    }
}
