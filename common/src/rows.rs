//! 行展開
//!
//! 1行に複数の番地が書かれている場合、番地ごとに1行へ展開する。

use crate::types::Address;

/// 番地文字列をカンマで分割（前後空白除去、空要素除外）
///
/// セミコロン等の他の区切り文字は扱わない。
pub fn split_house_numbers(house_numbers: &str) -> Vec<&str> {
    house_numbers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// 抽出結果を表示用の行に展開
///
/// 番地が0件または1件の行はそのまま残し、2件以上なら番地ごとにコピーする。
/// 出力順は入力順・番地の出現順に従う。
pub fn expand_house_numbers(addresses: Vec<Address>) -> Vec<Address> {
    addresses
        .into_iter()
        .flat_map(|address| {
            let numbers: Vec<String> = split_house_numbers(&address.house_numbers)
                .into_iter()
                .map(str::to_string)
                .collect();

            if numbers.len() <= 1 {
                return vec![address];
            }

            numbers
                .into_iter()
                .map(|house_numbers| Address {
                    house_numbers,
                    ..address.clone()
                })
                .collect()
        })
        .collect()
}
