fn main() {
    println!("{}", tiny_helper::greeting());
}

#[cfg(test)]
mod tests {
    #[test]
    fn greets() {
        tiny_testkit::check(!tiny_helper::greeting().is_empty());
    }
}
