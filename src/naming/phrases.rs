//! Literal tables the meaning synthesizer draws from.

use lazy_static::lazy_static;
use std::collections::HashMap;

const CHAR_PHRASES: &[(char, [&str; 4])] = &[
    ('清', ["清澈纯净", "清雅高洁", "清正廉洁", "清高自持"]),
    ('雅', ["高雅文雅", "雅致优美", "雅量高深", "雅俗共赏"]),
    ('嘉', ["美好吉祥", "嘉言善行", "嘉德懿行", "嘉惠后人"]),
    ('安', ["平安安定", "安详宁静", "安身立命", "安邦定国"]),
    ('明', ["明亮聪慧", "明理通达", "明德至善", "明察秋毫"]),
    ('乐', ["快乐愉悦", "乐天知命", "乐善好施", "乐而不淫"]),
    ('宁', ["宁静祥和", "宁折不弯", "宁静致远", "宁缺毋滥"]),
    ('远', ["远大志向", "远见卓识", "志存高远", "宁静致远"]),
    ('诗', ["诗意浪漫", "诗情画意", "诗书传家", "诗礼传家"]),
    ('云', ["云淡风轻", "云蒸霞蔚", "云开见日", "云行雨施"]),
    ('月', ["明月清辉", "月白风清", "月朗星稀", "花好月圆"]),
    ('风', ["风度翩翩", "风华正茂", "风清月朗", "风调雨顺"]),
    ('花', ["花容月貌", "花团锦簇", "花好月圆", "繁花似锦"]),
    ('雪', ["雪白纯净", "雪中送炭", "雪泥鸿爪", "冰雪聪明"]),
    ('雨', ["雨润万物", "雨过天晴", "雨露均沾", "春风化雨"]),
    ('山', ["山高水长", "山明水秀", "高山仰止", "山河锦绣"]),
    ('水', ["水润万物", "水到渠成", "上善若水", "水天一色"]),
    ('林', ["林木葱郁", "林下风致", "林泉高致", "茂林修竹"]),
    ('竹', ["竹节高风", "竹报平安", "虚心劲节", "茂林修竹"]),
    ('松', ["松柏长青", "松鹤延年", "松风明月", "松筠之节"]),
    ('梅', ["梅花傲雪", "暗香疏影", "梅兰竹菊", "梅妻鹤子"]),
    ('兰', ["兰花幽香", "兰心蕙质", "空谷幽兰", "兰桂齐芳"]),
    ('菊', ["菊花傲霜", "菊月清秋", "菊韵悠长", "东篱采菊"]),
    ('荷', ["出淤泥而不染", "荷风送香", "荷塘月色", "荷衣蕙带"]),
    ('莲', ["莲花清净", "莲心不染", "莲开并蒂", "步步生莲"]),
    ('桂', ["桂花飘香", "蟾宫折桂", "桂馥兰香", "桂殿兰宫"]),
    ('桃', ["桃花烂漫", "桃李满天下", "桃红柳绿", "世外桃源"]),
    ('李', ["李花如雪", "桃李芬芳", "投桃报李", "李郭仙舟"]),
    ('杏', ["杏花春雨", "杏林春暖", "杏坛育人", "红杏枝头"]),
    ('梨', ["梨花带雨", "梨园雅韵", "梨云梦暖", "梨花似雪"]),
    ('樱', ["樱花烂漫", "樱唇杏脸", "樱桃红熟", "樱笋春盘"]),
    ('枫', ["枫叶如火", "枫林晚照", "枫桥夜泊", "霜叶红于二月花"]),
    ('柳', ["柳絮飞扬", "柳暗花明", "柳绿花红", "杨柳依依"]),
    ('杨', ["杨柳依依", "杨花飞絮", "百步穿杨", "杨柳春风"]),
    ('柏', ["柏树常青", "柏舟之誓", "松柏后凋", "苍松翠柏"]),
    ('槐', ["槐花飘香", "槐荫满庭", "三槐世泽", "槐花黄时"]),
    ('椿', ["椿萱并茂", "椿庭萱室", "椿龄萱寿", "大椿长寿"]),
    ('楠', ["楠木成材", "楠木为梁", "栋梁之材", "楠木成林"]),
    ('梓', ["梓材成器", "桑梓情深", "梓里乡亲", "梓木良材"]),
    ('桐', ["桐花飘香", "桐叶知秋", "桐花万里", "凤栖梧桐"]),
    ('梧', ["梧桐叶落", "梧桐夜雨", "梧桐相待", "凤鸣高梧"]),
    ('桑', ["桑梓情深", "桑榆暮景", "桑田沧海", "桑弧蓬矢"]),
    ('榆', ["榆钱满树", "榆柳成荫", "桑榆非晚", "榆荫清凉"]),
    ('美', ["美丽动人", "美不胜收", "美轮美奂", "美玉无瑕"]),
    ('丽', ["丽质天成", "丽日当空", "风和日丽", "丽句清词"]),
    ('秀', ["秀外慧中", "钟灵毓秀", "秀出班行", "山清水秀"]),
    ('慧', ["慧质兰心", "慧眼识珠", "慧心巧思", "聪慧灵秀"]),
    ('智', ["智慧聪颖", "智勇双全", "智圆行方", "智珠在握"]),
    ('贤', ["贤良淑德", "见贤思齐", "贤才君子", "贤良方正"]),
    ('德', ["德才兼备", "德高望重", "德艺双馨", "德厚流光"]),
    ('仁', ["仁爱宽厚", "仁心仁术", "仁者爱人", "仁者无敌"]),
    ('义', ["义薄云天", "义无反顾", "义不容辞", "义正辞严"]),
    ('礼', ["礼贤下士", "礼尚往来", "知书达礼", "礼义廉耻"]),
    ('信', ["信守承诺", "信而有征", "诚信为本", "信誓旦旦"]),
    ('温', ["温文尔雅", "温润如玉", "温故知新", "温良恭俭"]),
    ('柔', ["温柔似水", "柔情似水", "刚柔并济", "柔心弱骨"]),
    ('婉', ["婉约动人", "婉转悠扬", "婉娩多姿", "清扬婉兮"]),
    ('约', ["简约大方", "约定俗成", "约法三章", "约己爱民"]),
    ('静', ["静若处子", "静水流深", "静观默察", "静心养性"]),
    ('淑', ["淑女风范", "淑质英才", "淑德贤良", "淑质贞亮"]),
    ('娴', ["娴静优雅", "娴熟老练", "娴于辞令", "娴雅端庄"]),
    ('华', ["华美绝伦", "华章丽句", "华彩纷呈", "风华正茂"]),
    ('英', ["英姿飒爽", "英明神武", "英雄豪杰", "英华外发"]),
    ('俊', ["俊美非凡", "俊逸超群", "俊采星驰", "俊秀不群"]),
    ('杰', ["杰出优秀", "杰作名篇", "人杰地灵", "杰然特立"]),
    ('豪', ["豪迈不羁", "豪情万丈", "豪言壮语", "豪放不羁"]),
    ('雄', ["雄才大略", "雄心壮志", "雄姿英发", "雄视千古"]),
    ('伟', ["伟岸不凡", "伟业丰功", "伟绩丰功", "伟岸不群"]),
    ('壮', ["壮志凌云", "壮心不已", "壮丽辉煌", "气壮山河"]),
    ('强', ["强健有力", "自强不息", "强本弱末", "坚强不屈"]),
    ('健', ["健康向上", "健步如飞", "健谈善辩", "天行健"]),
    ('康', ["康泰安康", "康庄大道", "康乐和顺", "康强逢吉"]),
    ('泰', ["泰然自若", "泰山北斗", "国泰民安", "否极泰来"]),
    ('和', ["和和美美", "和风细雨", "和衷共济", "和而不同"]),
    ('平', ["平平安安", "平易近人", "平心静气", "平步青云"]),
    ('逸', ["逸致闲情", "逸兴遄飞", "逸群绝伦", "逸趣横生"]),
    ('文', ["文质彬彬", "文采风流", "文思敏捷", "文以载道"]),
    ('武', ["武艺高强", "文武双全", "武德高尚", "武艺超群"]),
    ('才', ["才高八斗", "才子佳人", "才思敏捷", "德才兼备"]),
    ('艺', ["艺高胆大", "多才多艺", "艺不压身", "艺林翘楚"]),
    ('学', ["学富五车", "学而不厌", "学以致用", "学贯中西"]),
    ('识', ["识多见广", "远见卓识", "识文断字", "博闻强识"]),
    ('见', ["见多识广", "见微知著", "见义勇为", "真知灼见"]),
    ('闻', ["闻一知十", "闻名遐迩", "闻过则喜", "博闻强记"]),
    ('思', ["思虑周全", "思贤如渴", "饮水思源", "深思熟虑"]),
    ('念', ["念念不忘", "念兹在兹", "念旧情深", "一念初心"]),
    ('忆', ["忆苦思甜", "忆江南", "记忆犹新", "追忆似水"]),
    ('怀', ["怀瑾握瑜", "虚怀若谷", "胸怀天下", "怀古思今"]),
    ('春', ["春意盎然", "春光明媚", "春色满园", "春华秋实"]),
    ('夏', ["夏日炎炎", "夏雨雨人", "夏木阴阴", "华夏风采"]),
    ('秋', ["秋高气爽", "秋收冬藏", "秋月春风", "春华秋实"]),
    ('冬', ["冬日暖阳", "冬去春来", "冬暖夏凉", "冬梅傲雪"]),
    ('晨', ["晨光熹微", "晨钟暮鼓", "晨兴夜寐", "晨曦初露"]),
    ('夕', ["夕阳西下", "夕照山红", "夕惕若厉", "朝夕相伴"]),
    ('朝', ["朝气蓬勃", "朝思暮想", "朝阳初升", "朝霞满天"]),
    ('暮', ["暮色苍茫", "暮鼓晨钟", "暮云春树", "朝朝暮暮"]),
    ('晓', ["晓风残月", "晓行夜宿", "晓以大义", "春眠不觉晓"]),
    ('夜', ["夜阑人静", "夜以继日", "夜不闭户", "良辰美夜"]),
    ('昼', ["昼长夜短", "昼思夜想", "白昼如歌", "昼锦荣归"]),
    ('星', ["星光璀璨", "星月交辉", "星火燎原", "众星拱月"]),
    ('辰', ["辰星闪烁", "良辰美景", "辰光初现", "星辰大海"]),
    ('影', ["影影绰绰", "形影相随", "暗香疏影", "花影婆娑"]),
    ('色', ["色彩斑斓", "国色天香", "色艺双绝", "秀色可餐"]),
    ('彩', ["彩霞满天", "彩云追月", "丰富多彩", "流光溢彩"]),
    ('金', ["金玉满堂", "金碧辉煌", "金风玉露", "金声玉振"]),
    ('银', ["银装素裹", "火树银花", "银汉迢迢", "银河璀璨"]),
    ('玉', ["玉树临风", "玉洁冰清", "玉汝于成", "温润如玉"]),
    ('珠', ["珠光宝气", "珠联璧合", "珠圆玉润", "掌上明珠"]),
    ('宝', ["宝刀不老", "宝相庄严", "奇珍异宝", "如获至宝"]),
    ('珍', ["珍稀罕见", "珍而重之", "珍馐美味", "如数家珍"]),
    ('奇', ["奇思妙想", "奇花异草", "奇珍异宝", "卓尔不奇"]),
    ('妙', ["妙不可言", "妙手回春", "妙语连珠", "妙笔生花"]),
    ('神', ["神采飞扬", "神机妙算", "神清气爽", "炯炯有神"]),
    ('仙', ["仙风道骨", "仙姿玉貌", "仙山琼阁", "飘飘欲仙"]),
    ('灵', ["灵机一动", "灵犀一点", "灵秀天成", "钟灵毓秀"]),
    ('瑶', ["瑶池仙境", "琼瑶美玉", "瑶台月下", "瑶林琼树"]),
    ('琪', ["琪花瑶草", "美玉琪琳", "琪树生辉", "琪花玉树"]),
    ('瑾', ["怀瑾握瑜", "瑾瑜匿瑕", "美玉瑾然", "瑾德自修"]),
    ('瑜', ["瑕不掩瑜", "怀瑾握瑜", "瑜亮之才", "瑜伽清心"]),
    ('璇', ["璇玑玉衡", "璇闺绣户", "璇霄丹阙", "美玉璇玑"]),
    ('涵', ["涵养深厚", "海涵包容", "涵泳诗书", "内涵丰富"]),
    ('泽', ["恩泽四方", "泽被后世", "润泽万物", "光泽温润"]),
    ('澄', ["澄澈明净", "澄心静虑", "澄江似练", "海晏河澄"]),
    ('溪', ["溪水潺潺", "清溪流泉", "溪山行旅", "溪云初起"]),
    ('江', ["江山如画", "江天一色", "江南春色", "大江东去"]),
    ('海', ["海纳百川", "海阔天空", "海晏河清", "山海之志"]),
    ('霞', ["霞光万道", "云蒸霞蔚", "落霞孤鹜", "朝霞满天"]),
    ('曦', ["晨曦微露", "曦光初照", "春曦和暖", "曦月同辉"]),
    ('岚', ["山岚缭绕", "晴岚暖翠", "岚光如黛", "烟岚云岫"]),
    ('青', ["青云直上", "青出于蓝", "万古长青", "青山绿水"]),
    ('书', ["书香门第", "知书达理", "书卷多情", "书山有路"]),
    ('墨', ["翰墨飘香", "文人墨客", "惜墨如金", "墨韵悠长"]),
    ('琴', ["琴瑟和鸣", "琴心剑胆", "高山流水琴", "琴棋书画"]),
    ('棋', ["棋逢对手", "琴棋书画", "举棋若定", "棋局如人"]),
    ('歌', ["歌以咏志", "欢歌笑语", "长歌当哭", "行歌坐乐"]),
    ('舒', ["舒展自如", "云卷云舒", "舒心惬意", "舒朗大方"]),
    ('悦', ["心悦诚服", "赏心悦目", "和颜悦色", "喜悦安康"]),
    ('欣', ["欣欣向荣", "欣然自得", "欢欣鼓舞", "欣逢盛世"]),
    ('怡', ["心旷神怡", "怡然自得", "怡情养性", "怡红快绿"]),
    ('诚', ["诚心诚意", "精诚所至", "诚实守信", "坦诚相见"]),
];

pub struct SourceStyle {
    pub label: &'static str,
    pub keywords: [&'static str; 8],
}

pub const DEFAULT_STYLE_TAG: &str = "gushi";

const SOURCE_STYLES: &[(&str, SourceStyle)] = &[
    (
        "shijing",
        SourceStyle {
            label: "质朴自然",
            keywords: ["自然", "质朴", "清新", "纯真", "田园", "山水", "草木", "鸟兽"],
        },
    ),
    (
        "chuci",
        SourceStyle {
            label: "宏大浪漫",
            keywords: ["浪漫", "宏大", "神话", "香草", "美人", "神鸟", "奇幻", "想象"],
        },
    ),
    (
        "tangshi",
        SourceStyle {
            label: "豪放开阔",
            keywords: ["豪放", "开阔", "大气", "壮志", "边塞", "明月", "长风", "大漠"],
        },
    ),
    (
        "songci",
        SourceStyle {
            label: "婉约深情",
            keywords: ["婉约", "深情", "细腻", "柔情", "小桥", "流水", "落花", "春水"],
        },
    ),
    (
        "yuefu",
        SourceStyle {
            label: "民歌质朴",
            keywords: ["民歌", "质朴", "生动", "民间", "生活", "情感", "直白", "真挚"],
        },
    ),
    (
        "gushi",
        SourceStyle {
            label: "古典雅致",
            keywords: ["古典", "雅致", "传统", "文化", "历史", "经典", "传承", "底蕴"],
        },
    ),
    (
        "cifu",
        SourceStyle {
            label: "华丽铺陈",
            keywords: ["华丽", "铺陈", "辞藻", "优美", "典雅", "文采", "修辞", "艺术"],
        },
    ),
];

pub const CONNECTORS: [&str; 7] = ["蕴含", "寄托", "彰显", "融汇", "凝练", "映照", "传达"];

lazy_static! {
    static ref PHRASES_BY_CHAR: HashMap<char, &'static [&'static str; 4]> =
        CHAR_PHRASES.iter().map(|(c, phrases)| (*c, phrases)).collect();
}

pub fn phrases_for(c: char) -> Option<&'static [&'static str; 4]> {
    PHRASES_BY_CHAR.get(&c).copied()
}

/// Style of a source tag, the classical-poetry default for unknown tags.
pub fn style_for(source_tag: &str) -> &'static SourceStyle {
    SOURCE_STYLES
        .iter()
        .find(|(tag, _)| *tag == source_tag)
        .or_else(|| SOURCE_STYLES.iter().find(|(tag, _)| *tag == DEFAULT_STYLE_TAG))
        .map(|(_, style)| style)
        .unwrap_or(&SOURCE_STYLES[0].1)
}
