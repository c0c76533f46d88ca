//! 外部サービスの抽象化
//!
//! コントローラはこの3つのトレイト越しにAI・画像処理・ストレージを使う。
//! テストでは固定値を返す実装に差し替える。

use crate::error::Result;
use crate::types::Address;

/// AIによる住所抽出
#[allow(async_fn_in_trait)]
pub trait AddressExtractor {
    /// 画像（Base64）から住所行を抽出
    ///
    /// 失敗はすべて `Error::Extraction`（ユーザー向けメッセージ）で返す。
    /// 再試行はしない。
    async fn extract_addresses(&self, base64_image: &str, mime_type: &str) -> Result<Vec<Address>>;
}

/// 画像の読み込みと縮小
#[allow(async_fn_in_trait)]
pub trait ImageCodec {
    /// 読み込み元（CLI: ファイルパス、WASM: File）
    type Source: ?Sized;

    /// ファイルを Data URL に変換
    async fn encode_file(&self, source: &Self::Source) -> Result<String>;

    /// 縦横比を保って縮小し、JPEGで再エンコードした Data URL を返す
    async fn make_thumbnail(
        &self,
        data_url: &str,
        max_width: u32,
        max_height: u32,
        quality: f32,
    ) -> Result<String>;
}

/// 永続キーバリューストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
