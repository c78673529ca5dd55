// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn plant_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Plant{i}")).collect()
}

#[allow(dead_code)]
pub fn generate_automata(names: &[String]) -> String {
    let mut content = String::from("// generated benchmark model\nconst int N = 3;\n\n");

    for name in names {
        content.push_str(&format!("plant automaton {name}:\n"));
        content.push_str("  controllable c_on, c_off;\n");
        content.push_str("  location off: initial; marked;\n    edge c_on goto on;\n");
        content.push_str("  location on:\n    edge c_off goto off;\n");
        content.push_str("end\n\n");
        content.push_str(&format!("requirement {name}.on disables {name}.c_on;\n"));
    }

    content
}
