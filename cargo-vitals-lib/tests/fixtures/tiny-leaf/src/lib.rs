pub const NAME: &str = "tiny-leaf";
