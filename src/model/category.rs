use crate::constants;

/// Title prefixes per category. Rows are tried top to bottom and prefixes left to right,
/// the first prefix the title starts with decides the category.
pub static CATEGORY_RULES: [(&str, &[&str]); 12] = [
    ("央视", &["CCTV", "央视"]),
    (
        "地方",
        &[
            "北京", "上海", "广东", "江苏", "浙江", "湖南", "湖北", "河南", "河北", "山东", "山西",
            "陕西", "甘肃", "青海", "宁夏", "新疆", "西藏", "四川", "重庆", "云南", "贵州", "广西",
            "海南", "辽宁", "吉林", "黑龙江", "安徽", "福建", "江西", "内蒙古", "天津", "兵团",
        ],
    ),
    (
        "港澳台",
        &[
            "凤凰", "翡翠", "明珠", "本港", "亚视", "中天", "东森", "TVBS", "华视", "中视", "民视",
            "公视", "三立", "八大", "台视",
        ],
    ),
    ("电影", &["电影", "Movie", "Film"]),
    ("电视剧", &["电视剧", "Drama", "Series"]),
    ("综艺", &["综艺", "Variety"]),
    (
        "体育",
        &[
            "体育", "Sports", "NBA", "足球", "篮球", "英超", "西甲", "意甲", "德甲", "欧冠",
        ],
    ),
    ("新闻", &["新闻", "News"]),
    ("少儿", &["少儿", "动画", "Cartoon", "Kids"]),
    ("音乐", &["音乐", "Music", "MTV"]),
    ("纪实", &["纪实", "纪录", "Documentary"]),
    ("科教", &["科教", "科学", "教育", "Science", "Education"]),
];

/// Guesses the category of a channel that came without one.
pub fn infer(title: &str) -> &'static str {
    CATEGORY_RULES
        .iter()
        .find(|(_, prefixes)| prefixes.iter().any(|prefix| title.starts_with(prefix)))
        .map(|(category, _)| *category)
        .unwrap_or(constants::DEFAULT_CATEGORY)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_prefixes() {
        assert_eq!(infer("CCTV1 综合"), "央视");
        assert_eq!(infer("央视新闻"), "央视");
        assert_eq!(infer("黑龙江卫视"), "地方");
        assert_eq!(infer("TVBS新闻"), "港澳台");
        assert_eq!(infer("Movie Central"), "电影");
        assert_eq!(infer("NBA TV"), "体育");
        assert_eq!(infer("Kids Zone"), "少儿");
        assert_eq!(infer("Education 1"), "科教");
    }

    #[test]
    fn earlier_rows_win() {
        // starts with a province and also contains a news keyword
        assert_eq!(infer("北京新闻"), "地方");
        // "新闻" is only matched at the start
        assert_eq!(infer("凤凰新闻"), "港澳台");
        assert_eq!(infer("新闻联播"), "新闻");
    }

    #[test]
    fn prefix_not_substring() {
        assert_eq!(infer("My CCTV"), constants::DEFAULT_CATEGORY);
        assert_eq!(infer("cctv1"), constants::DEFAULT_CATEGORY);
    }

    #[test]
    fn fallback() {
        assert_eq!(infer("Random Channel"), "用户频道");
        assert_eq!(infer(""), "用户频道");
    }

    #[test]
    fn rows_are_unique() {
        let mut names: Vec<_> = CATEGORY_RULES.iter().map(|(name, _)| *name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), CATEGORY_RULES.len());
        assert_eq!(CATEGORY_RULES[1].1.len(), 32);
    }
}
