use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/chords.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the chord catalog before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let instruments = catalog.get("instruments").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'instruments' field\n\
             The catalog must have a top-level 'instruments' object.\n"
        );
    });

    let instruments = instruments.as_object().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'instruments' must be an object\n\
             Got: {instruments}\n"
        );
    });

    let mut total_chords = 0;
    for (instrument, chords) in instruments {
        let chords = chords.as_array().unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: Chords for '{instrument}' must be an array\n"
            );
        });
        for (i, chord) in chords.iter().enumerate() {
            validate_chord_fields(chord, instrument, i);
        }
        total_chords += chords.len();
    }

    println!(
        "cargo:warning=Validated chord catalog: {} instruments, {total_chords} chords",
        instruments.len()
    );
}

fn validate_chord_fields(chord: &serde_json::Value, instrument: &str, index: usize) {
    let fields = chord.as_object().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: '{instrument}' chord at index {index} must be an object\n"
        );
    });

    for required in ["chord", "modifier"] {
        assert!(
            fields.get(required).is_some_and(serde_json::Value::is_string),
            "\n\nCATALOG BUILD ERROR: '{instrument}' chord at index {index} missing string '{required}' field\n"
        );
    }

    // Every other field is a string -> fret mapping
    for (string, fret) in fields {
        if string == "chord" || string == "modifier" {
            continue;
        }
        let fret = fret.as_str().unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: '{instrument}' chord at index {index}: fret for '{string}' must be a string\n"
            );
        });
        assert!(
            !fret.is_empty() && fret.chars().all(|c| c.is_ascii_digit()),
            "\n\nCATALOG BUILD ERROR: '{instrument}' chord at index {index}: fret '{fret}' for '{string}' is not a number\n"
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/chords.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
