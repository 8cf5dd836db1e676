//! Unit 1: numbers, family, sun and moon.

use super::Word;

/// Practiced in both Read and Write mode.
pub static UNIT1_WRITE_WORDS: [Word; 16] = [
    Word::new("yi-one", "一", "yī", "one"),
    Word::new("er-two", "二", "èr", "two"),
    Word::new("san-three", "三", "sān", "three"),
    Word::new("si-four", "四", "sì", "four"),
    Word::new("wu-five", "五", "wǔ", "five"),
    Word::new("liu-six", "六", "liù", "six"),
    Word::new("qi-seven", "七", "qī", "seven"),
    Word::new("ba-eight", "八", "bā", "eight"),
    Word::new("jiu-nine", "九", "jiǔ", "nine"),
    Word::new("shi-ten", "十", "shí", "ten"),
    Word::new("baba-dad", "爸爸", "bàba", "dad"),
    Word::new("mama-mom", "妈妈", "māma", "mom"),
    Word::new("ren-person", "人", "rén", "person"),
    Word::new("ri-sun", "日", "rì", "sun"),
    Word::new("yue-moon", "月", "yuè", "moon"),
    Word::new("ban-half", "半", "bàn", "half"),
];

/// Read mode only.
pub static UNIT1_READ_ONLY_WORDS: [Word; 11] = [
    Word::new("xia-down", "下", "xià", "down"),
    Word::new("da-big", "大", "dà", "big"),
    Word::new("xiao-small", "小", "xiǎo", "small"),
    Word::new("gege-older-brother", "哥哥", "gēge", "older brother"),
    Word::new("jiejie-older-sister", "姐姐", "jiějie", "older sister"),
    Word::new("didi-younger-brother", "弟弟", "dìdi", "younger brother"),
    Word::new("meimei-younger-sister", "妹妹", "mèimei", "younger sister"),
    Word::new("yeye-grandpa-dad", "爷爷", "yéye", "grandpa (dad's side)"),
    Word::new("nainai-grandma-dad", "奶奶", "nǎinai", "grandma (dad's side)"),
    Word::new("waigong-grandpa-mom", "外公", "wàigōng", "grandpa (mom's side)"),
    Word::new("waipo-grandma-mom", "外婆", "wàipó", "grandma (mom's side)"),
];
