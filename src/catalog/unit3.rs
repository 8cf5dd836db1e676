//! Unit 3: school, New Year words and colours.

use super::Word;

/// Practiced in both Read and Write mode.
pub static UNIT3_WRITE_WORDS: [Word; 12] = [
    Word::new("tu-soil", "土", "tǔ", "soil"),
    Word::new("ge-unit", "个", "gè", "unit / measure word"),
    Word::new("gong-public", "公", "gōng", "public"),
    Word::new("la-trash", "垃", "lā", "trash (la)"),
    Word::new("ji-trash", "圾", "jī", "trash (ji)"),
    Word::new("xue-study", "学", "xué", "study"),
    Word::new("ma-horse", "马", "mǎ", "horse"),
    Word::new("nian-year", "年", "nián", "year"),
    Word::new("fu-fortune", "福", "fú", "good fortune"),
    Word::new("hui-return", "回", "huí", "return"),
    Word::new("ni-you", "你", "nǐ", "you"),
    Word::new("ke-can", "可", "kě", "can / but"),
];

/// Read mode only.
pub static UNIT3_READ_ONLY_WORDS: [Word; 8] = [
    Word::new("li-inside", "里", "lǐ", "inside"),
    Word::new("sheng-life", "生", "shēng", "life / born"),
    Word::new("hong-red", "红", "hóng", "red"),
    Word::new("hei-black", "黑", "hēi", "black"),
    Word::new("shou-receive", "收", "shōu", "receive"),
    Word::new("lv-green", "绿", "lǜ", "green"),
    Word::new("yu-fish", "鱼", "yú", "fish"),
    Word::new("zhu-wish", "祝", "zhù", "wish / congratulate"),
];
