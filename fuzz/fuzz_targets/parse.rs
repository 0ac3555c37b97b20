#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any input must produce a tree or an error, never a panic.
    if let Ok(root) = json_tree::from_slice(data) {
        assert!(root.is_object() || root.is_array());
    }
});
