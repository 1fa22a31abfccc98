pub fn greeting() -> String {
    format!("hello from {}", tiny_leaf::NAME)
}
