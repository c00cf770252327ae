//! Country tables: the canonical names the corpus covers, the aliases users
//! type instead, and the wider vocabulary used to recognise real countries the
//! corpus does not cover.
//!
//! Order matters in every table here. Lookups scan front to back and the first
//! hit wins, so when one name is a substring of another (印度 / 印度尼西亚) the
//! earlier entry decides the outcome.

/// Canonical country names, exactly as they appear in the store's `country`
/// metadata field.
pub const SUPPORTED_COUNTRIES: &[&str] = &[
    "英国", "美国", "德国", "法国", "日本", "韩国", "新加坡", "中国香港",
    "中国台湾", "巴西", "阿根廷", "墨西哥", "加拿大", "澳大利亚", "新西兰", "印度",
    "泰国", "越南", "印度尼西亚", "菲律宾", "马来西亚", "土耳其", "沙特阿拉伯", "阿联酋",
    "意大利", "西班牙", "荷兰", "比利时", "瑞士", "瑞典", "丹麦", "挪威",
    "波兰", "俄罗斯", "南非", "埃及", "以色列", "卡塔尔", "哈萨克斯坦", "乌兹别克斯坦",
    "吉尔吉斯斯坦", "塔吉克斯坦", "土库曼斯坦", "吉尔吉斯共和国", "加纳", "匈牙利", "卢森堡", "保加利亚",
    "拉脱维亚", "斯洛伐克", "秘鲁", "罗马尼亚", "阿尔及利亚", "多米尼加共和国", "尼日利亚", "哥伦比亚",
    "哥斯达黎加", "希腊", "马耳他", "巴基斯坦",
];

/// Alias → canonical name. Every target must be a member of
/// [`SUPPORTED_COUNTRIES`].
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("印尼", "印度尼西亚"),
    ("大马", "马来西亚"),
    ("UK", "英国"),
    ("USA", "美国"),
    ("US", "美国"),
    ("America", "美国"),
    ("德国", "德国"),
    ("Deutschland", "德国"),
    ("法国", "法国"),
    ("日本", "日本"),
    ("韩国", "韩国"),
    ("俄国", "俄罗斯"),
    ("澳洲", "澳大利亚"),
];

/// Country and territory names outside the supported set. Together with
/// [`SUPPORTED_COUNTRIES`] this forms the known-country vocabulary.
pub const UNSUPPORTED_COUNTRIES: &[&str] = &[
    "中国", "中国大陆", "朝鲜", "蒙古", "缅甸", "老挝", "柬埔寨", "伊朗",
    "伊拉克", "叙利亚", "约旦", "黎巴嫩", "也门", "阿曼", "科威特", "巴林",
    "利比亚", "突尼斯", "摩洛哥", "苏丹", "埃塞俄比亚", "肯尼亚", "坦桑尼亚", "乌干达",
    "赞比亚", "津巴布韦", "博茨瓦纳", "纳米比亚", "安哥拉", "莫桑比克", "马达加斯加", "毛里求斯",
    "塞舌尔", "科特迪瓦", "塞内加尔", "喀麦隆", "刚果", "卢旺达", "布隆迪", "冰岛",
    "爱尔兰", "葡萄牙", "奥地利", "芬兰", "捷克", "塞尔维亚", "克罗地亚", "斯洛文尼亚",
    "乌克兰", "白俄罗斯", "立陶宛", "爱沙尼亚", "孟加拉", "斯里兰卡", "尼泊尔", "不丹",
    "马尔代夫", "阿富汗", "格鲁吉亚", "阿塞拜疆", "亚美尼亚", "文莱", "东帝汶", "巴布亚新几内亚",
    "斐济", "汤加", "萨摩亚", "瓦努阿图", "所罗门群岛", "基里巴斯", "瑙鲁", "帕劳",
    "图瓦卢", "古巴", "牙买加", "海地", "多米尼加", "巴哈马", "巴巴多斯", "特立尼达和多巴哥",
    "格林纳达", "圣卢西亚", "圣文森特和格林纳丁斯", "安提瓜和巴布达", "圣基茨和尼维斯", "伯利兹", "危地马拉", "洪都拉斯",
    "萨尔瓦多", "尼加拉瓜", "巴拿马", "委内瑞拉", "厄瓜多尔", "玻利维亚", "巴拉圭", "乌拉圭",
    "智利", "圭亚那", "苏里南", "法属圭亚那", "马尔维纳斯群岛", "格陵兰", "百慕大", "波多黎各",
    "关岛", "美属维尔京群岛", "英属维尔京群岛", "安圭拉", "蒙特塞拉特", "特克斯和凯科斯群岛", "开曼群岛", "阿鲁巴",
    "库拉索", "荷属圣马丁", "法属圣马丁", "瓜德罗普", "马提尼克", "留尼汪", "马约特", "法属波利尼西亚",
    "新喀里多尼亚", "瓦利斯和富图纳", "托克劳", "纽埃", "库克群岛", "皮特凯恩群岛", "圣诞岛", "科科斯群岛",
    "诺福克岛", "赫德岛和麦克唐纳群岛", "法属南部领地", "布韦岛", "南乔治亚和南桑威奇群岛", "英属印度洋领地", "安道尔", "摩纳哥",
    "列支敦士登", "圣马力诺", "梵蒂冈", "塞浦路斯", "摩尔多瓦", "黑山", "北马其顿", "波斯尼亚和黑塞哥维那",
    "阿尔巴尼亚", "科索沃", "直布罗陀", "根西岛", "泽西岛", "马恩岛", "法罗群岛", "奥兰群岛",
    "斯瓦尔巴群岛", "扬马延岛", "新西伯利亚群岛", "法兰士约瑟夫地群岛", "中非", "乍得", "刚果共和国", "刚果民主共和国",
    "赤道几内亚", "加蓬", "圣多美和普林西比", "科摩罗", "吉布提", "厄立特里亚", "索马里", "南苏丹",
    "贝宁", "布基纳法索", "佛得角", "冈比亚", "几内亚", "几内亚比绍", "利比里亚", "马里",
    "毛里塔尼亚", "尼日尔", "塞拉利昂", "多哥", "莱索托", "斯威士兰", "马拉维", "圣赫勒拿",
    "阿森松", "特里斯坦-达库尼亚", "西撒哈拉", "索马里兰", "马耳他骑士团", "北塞浦路斯", "南奥塞梯", "阿布哈兹",
    "纳戈尔诺-卡拉巴赫", "德涅斯特河沿岸", "卢甘斯克", "顿涅茨克", "克里米亚", "塞瓦斯托波尔", "巴勒斯坦", "中华民国",
    "香港", "台湾", "澳门",
];

/// The full known-country vocabulary: supported names first, then the rest.
pub fn known_countries() -> impl Iterator<Item = &'static str> {
    SUPPORTED_COUNTRIES
        .iter()
        .chain(UNSUPPORTED_COUNTRIES.iter())
        .copied()
}
