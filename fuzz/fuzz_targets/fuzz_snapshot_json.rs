#![no_main]

use libfuzzer_sys::fuzz_target;
use palladium_model::{compile_scene, SceneSnapshot};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = SceneSnapshot::from_json(text) else {
        return;
    };
    if let Ok((scene, meta)) = snapshot.restore() {
        let _ = compile_scene(&scene, meta);
    }
});
