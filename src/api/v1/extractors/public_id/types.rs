/**
 * Responsibility
 *
 * 主な責務
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置くもの
 *  - ClipTag などのタグ型
 *  - type PublicClipId = PublicId<ClipTag> のような alias
 *
 * 置かないもの
 *  - decode ロジック
 *  - extractor 実装
 */
use super::core::{PublicId, ResourceTag};

// clips
pub enum ClipTag {}

impl ResourceTag for ClipTag {
    const RESOURCE: &'static str = "Clip";
}

pub type PublicClipId = PublicId<ClipTag>;
