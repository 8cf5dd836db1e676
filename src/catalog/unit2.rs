//! Unit 2: compass directions, home and everyday function words.

use super::Word;

/// Practiced in both Read and Write mode.
pub static UNIT2_WRITE_WORDS: [Word; 13] = [
    Word::new("xi-west", "西", "xī", "west"),
    Word::new("jia-home", "家", "jiā", "home"),
    Word::new("wo-i", "我", "wǒ", "I"),
    Word::new("de-of", "的", "de", "of / 's"),
    Word::new("nv-woman", "女", "nǚ", "woman"),
    Word::new("kou-mouth", "口", "kǒu", "mouth"),
    Word::new("qu-go", "去", "qù", "go"),
    Word::new("zi-child", "子", "zǐ", "child (depends on context)"),
    Word::new("zhi-only", "只", "zhǐ", "only / measure word"),
    Word::new("chang-long", "长", "cháng", "long"),
    Word::new("fang-square", "方", "fāng", "square"),
    Word::new("zai-at", "在", "zài", "at"),
    Word::new("le-already", "了", "le", "already"),
];

/// Read mode only.
pub static UNIT2_READ_ONLY_WORDS: [Word; 14] = [
    Word::new("dong-east", "东", "dōng", "east"),
    Word::new("nan-south", "南", "nán", "south"),
    Word::new("bei-north", "北", "běi", "north"),
    Word::new("bao-treasure", "宝", "bǎo", "treasure"),
    Word::new("shui-water", "水", "shuǐ", "water"),
    Word::new("zuo-left", "左", "zuǒ", "left"),
    Word::new("you-right", "右", "yòu", "right"),
    Word::new("niao-bird", "鸟", "niǎo", "bird"),
    Word::new("shou-hand", "手", "shǒu", "hand"),
    Word::new("tian-sky", "天", "tiān", "sky"),
    Word::new("xing-shape", "形", "xíng", "shape"),
    Word::new("fang-house", "房", "fáng", "house"),
    Word::new("wen-writing", "文", "wén", "writing (depends on context)"),
    Word::new("dong-winter", "冬", "dōng", "winter"),
];
