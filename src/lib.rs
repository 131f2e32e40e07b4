pub mod api;
pub mod db;

pub fn banner() -> &'static str {
    "Todo API server"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner() {
        assert_eq!(banner(), "Todo API server");
    }
}
