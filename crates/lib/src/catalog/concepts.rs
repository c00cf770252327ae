//! The HR concept catalog.
//!
//! Each row names a concept, the surface forms that reveal it in a question,
//! the terms it looks for in candidate passages and the bonus a passage earns
//! when it contains one of those terms. Adding a concept means adding a row.

/// A question-side pattern that selects a concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Exact substring.
    Phrase(&'static str),
    /// Substring compared after ASCII lowercasing. The pattern itself must be
    /// lowercase.
    PhraseIgnoreAsciiCase(&'static str),
    /// Every listed substring must be present, anywhere in the question.
    AllOf(&'static [&'static str]),
}

impl Trigger {
    /// `lowered` must be `question.to_ascii_lowercase()`.
    pub fn matches(&self, question: &str, lowered: &str) -> bool {
        match self {
            Trigger::Phrase(p) => question.contains(p),
            Trigger::PhraseIgnoreAsciiCase(p) => lowered.contains(p),
            Trigger::AllOf(parts) => parts.iter().all(|p| question.contains(p)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Concept {
    pub name: &'static str,
    pub triggers: &'static [Trigger],
    /// Terms searched for in passages once the concept is selected.
    pub terms: &'static [&'static str],
    /// Added at most once per passage, whichever term matched.
    pub weight: u32,
}

impl Concept {
    pub fn is_triggered_by(&self, question: &str, lowered: &str) -> bool {
        self.triggers.iter().any(|t| t.matches(question, lowered))
    }

    pub fn appears_in(&self, text: &str) -> bool {
        self.terms.iter().any(|term| text.contains(term))
    }
}

const TOP: u32 = 25;
const HIGH: u32 = 20;
const MEDIUM: u32 = 15;
const CONTRACT: u32 = 12;
const LOW: u32 = 5;

use Trigger::{AllOf, Phrase, PhraseIgnoreAsciiCase};

macro_rules! concept {
    ($name:literal, [$($trigger:expr),+ $(,)?], [$($term:literal),+ $(,)?], $weight:expr) => {
        Concept {
            name: $name,
            triggers: &[$($trigger),+],
            terms: &[$($term),+],
            weight: $weight,
        }
    };
}

pub const DOMAIN_CONCEPTS: &[Concept] = &[
    concept!("年假", [Phrase("年假")], ["年假"], TOP),
    concept!(
        "试用期",
        [Phrase("试用期"), PhraseIgnoreAsciiCase("probation")],
        ["试用期"],
        HIGH
    ),
    concept!(
        "工作时间",
        [Phrase("工作时长"), Phrase("工作时间")],
        ["工作时长", "工作时间"],
        MEDIUM
    ),
    concept!("加班", [Phrase("加班")], ["加班"], HIGH),
    concept!(
        "工资",
        [Phrase("工资"), Phrase("薪资"), Phrase("最低")],
        ["工资", "薪资", "最低"],
        MEDIUM
    ),
    concept!("合同", [Phrase("合同")], ["合同"], CONTRACT),
    concept!(
        "休假",
        [Phrase("休假"), Phrase("假期")],
        ["休假", "假期"],
        LOW
    ),
    concept!(
        "社保",
        [Phrase("社保"), Phrase("保险")],
        ["社保", "保险"],
        LOW
    ),
    concept!(
        "解雇",
        [Phrase("解雇"), Phrase("辞退"), Phrase("离职")],
        ["解雇", "辞退", "离职"],
        LOW
    ),
    concept!(
        "招聘",
        [Phrase("招聘"), Phrase("雇佣")],
        ["招聘", "雇佣"],
        LOW
    ),
    concept!(
        "个税",
        [Phrase("个税"), Phrase("所得税")],
        ["个税", "所得税"],
        LOW
    ),
    concept!("福利", [Phrase("福利")], ["福利"], LOW),
    concept!("工时", [Phrase("工时")], ["工时"], LOW),
    concept!("病假", [Phrase("病假")], ["病假"], LOW),
    concept!("产假", [Phrase("产假")], ["产假"], LOW),
    concept!("陪产假", [Phrase("陪产假")], ["陪产假"], LOW),
    concept!("育儿假", [Phrase("育儿假")], ["育儿假"], LOW),
    concept!(
        "法定节假日",
        [Phrase("法定节假日"), Phrase("公共假期")],
        ["法定节假日", "公共假期"],
        LOW
    ),
    concept!("调休", [Phrase("调休")], ["调休"], LOW),
    concept!(
        "遣散费",
        [Phrase("遣散费"), Phrase("赔偿金")],
        ["遣散费", "赔偿金"],
        LOW
    ),
    concept!(
        "竞业禁止",
        [Phrase("竞业禁止"), Phrase("保密协议")],
        ["竞业禁止", "保密协议"],
        LOW
    ),
    concept!("工会", [Phrase("工会")], ["工会"], LOW),
    concept!("歧视", [Phrase("歧视")], ["歧视"], LOW),
    concept!(
        "职业安全健康",
        [AllOf(&["安全", "健康"])],
        ["安全", "健康"],
        LOW
    ),
    concept!("工伤", [Phrase("工伤")], ["工伤"], LOW),
    concept!(
        "移民签证",
        [
            Phrase("移民"),
            Phrase("签证"),
            Phrase("工作许可"),
            Phrase("工作签证"),
        ],
        ["移民", "签证", "工作许可", "工作签证"],
        MEDIUM
    ),
    concept!(
        "养老金",
        [Phrase("养老金"), Phrase("退休金")],
        ["养老金", "退休金"],
        LOW
    ),
    concept!("医疗", [Phrase("医疗")], ["医疗"], LOW),
    concept!(
        "奖金",
        [Phrase("奖金"), Phrase("年终奖"), Phrase("十三薪")],
        ["奖金", "年终奖", "十三薪"],
        LOW
    ),
    concept!(
        "津贴",
        [Phrase("津贴"), Phrase("补贴")],
        ["津贴", "补贴"],
        LOW
    ),
    concept!("报销", [Phrase("报销")], ["报销"], LOW),
    concept!("培训", [Phrase("培训")], ["培训"], LOW),
    concept!("绩效", [Phrase("绩效")], ["绩效"], LOW),
    concept!("考勤", [Phrase("考勤")], ["考勤"], LOW),
    concept!(
        "远程工作",
        [Phrase("远程工作"), Phrase("居家办公")],
        ["远程工作", "居家办公"],
        MEDIUM
    ),
    concept!("灵活工作", [Phrase("灵活工作")], ["灵活工作"], MEDIUM),
    concept!(
        "最低工资",
        [Phrase("最低工资"), Phrase("底薪")],
        ["最低工资", "底薪"],
        MEDIUM
    ),
    concept!("薪酬", [Phrase("薪酬")], ["薪酬"], LOW),
    concept!("待遇", [Phrase("待遇")], ["待遇"], LOW),
    concept!(
        "劳动",
        [Phrase("劳动"), Phrase("劳工")],
        ["劳动", "劳工"],
        LOW
    ),
    concept!("雇佣", [Phrase("雇佣")], ["雇佣"], LOW),
    concept!("就业", [Phrase("就业")], ["就业"], LOW),
    concept!(
        "人力资源",
        [Phrase("HR"), Phrase("人力资源")],
        ["HR", "人力资源"],
        LOW
    ),
    concept!("合规", [Phrase("合规")], ["合规"], LOW),
    concept!("劳动法", [AllOf(&["法律", "劳动"])], ["劳动法"], LOW),
    concept!(
        "劳动法规",
        [AllOf(&["法规", "劳动"]), AllOf(&["法规", "雇佣"])],
        ["劳动法规"],
        LOW
    ),
];
