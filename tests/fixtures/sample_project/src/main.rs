//! Sample project used by the golden tests

fn main() {
    let name = "world";
    println!("{}", greet(name));
}

fn greet(name: &str) -> String {
    format!("Hello, {}!", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_world() {
        assert_eq!(greet("world"), "Hello, world!");
    }
}
