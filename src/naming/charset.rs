use lazy_static::lazy_static;
use std::collections::HashSet;

/// Grammatical and overly common characters that never appear in a candidate.
const MEANINGLESS: &str = concat!(
    // particles and classical function words
    "的了之乎也哉兮而以为于在有无不可能会要想说道曰云谓称叫做成变化",
    "其者与及焉矣耳乃则即亦皆且或故虽若如何岂夫彼此斯是非莫勿毋弗未已既",
    "尚犹复又更俱共同并各每诸凡欤耶邪嗟噫矣焉所",
    // pronouns and colloquial particles
    "我吾余予汝尔他她它们个这那哪谁把被让给对跟呢吗吧啊呀哦",
    // motion and position
    "生死来去到从向往回进出上下左右前后里外内中间边旁侧面方位置地处",
    // time
    "时候刻分秒年月日天夜晚早午晨夕朝暮晓昼",
    // imagery too generic to carry a name
    "星辰光影色彩金银玉珠宝珍奇妙神仙灵",
    // measure words and numerals
    "一二三四五六七八九十百千万两几只条张",
);

lazy_static! {
    pub static ref MEANINGLESS_CHARS: HashSet<char> = MEANINGLESS.chars().collect();
}

/// True for characters of the CJK unified ideograph range names are built from.
pub fn is_core_char(c: char) -> bool {
    ('\u{4E00}'..='\u{9FA5}').contains(&c)
}

pub fn is_meaningless(c: char) -> bool {
    MEANINGLESS_CHARS.contains(&c)
}

/// A character a candidate may contain.
pub fn is_name_char(c: char) -> bool {
    is_core_char(c) && !is_meaningless(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_range_is_cjk_unified_ideographs() {
        assert!(is_core_char('一'));
        assert!(is_core_char('龥'));
        assert!(!is_core_char('a'));
        assert!(!is_core_char('，'));
        assert!(!is_core_char('\u{9FA6}'));
    }

    #[test]
    fn meaningless_set_covers_function_words() {
        assert!(MEANINGLESS_CHARS.len() >= 150);
        for c in ['之', '兮', '的', '月', '光'] {
            assert!(is_meaningless(c), "{} should be meaningless", c);
        }
        for c in ['清', '雅', '松', '竹'] {
            assert!(is_name_char(c), "{} should be usable", c);
        }
    }
}
