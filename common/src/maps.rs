//! 地図検索リンク

use crate::types::Address;

/// 地図検索URLのテンプレート（末尾にクエリを連結する）
pub const MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// 検索クエリ "通り 番地, 郵便番号 市町村"
pub fn map_query(address: &Address) -> String {
    format!(
        "{} {}, {} {}",
        address.street, address.house_numbers, address.plz, address.city
    )
}

/// 住所1行の地図検索URL
pub fn map_search_url(address: &Address) -> String {
    format!("{}{}", MAP_SEARCH_URL, urlencoding::encode(&map_query(address)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_search_url() {
        let address = Address {
            plz: "10115".to_string(),
            street: "Teststr.".to_string(),
            house_numbers: "1".to_string(),
            city: "Berlin".to_string(),
        };

        assert_eq!(
            map_search_url(&address),
            "https://www.google.com/maps/search/?api=1&query=Teststr.%201%2C%2010115%20Berlin"
        );
    }

    #[test]
    fn test_map_search_url_encodes_umlauts() {
        let address = Address {
            plz: "80331".to_string(),
            street: "Müllerstraße".to_string(),
            house_numbers: "5a".to_string(),
            city: "München".to_string(),
        };

        let url = map_search_url(&address);
        assert!(url.starts_with(MAP_SEARCH_URL));
        assert!(url.contains("M%C3%BCllerstra%C3%9Fe"));
        assert!(url.ends_with("M%C3%BCnchen"));
        assert!(!url[MAP_SEARCH_URL.len()..].contains(' '));
    }
}
