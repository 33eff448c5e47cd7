#![no_main]

use libfuzzer_sys::fuzz_target;
use palladium_model::{compile_scene, load_document, ModelDocument};

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = ModelDocument::from_slice(data) else {
        return;
    };
    if let Ok((scene, meta)) = load_document(&doc) {
        let recompiled =
            compile_scene(&scene, meta).expect("loaded documents are within the nesting limit");
        assert_eq!(recompiled.part_count(), doc.part_count());
        let _ = recompiled.to_json_pretty();
    }
});
