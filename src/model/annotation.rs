use std::collections::VecDeque;

use super::interval::ChromosomeInterval;

/// 有序、无重复的标签序列，两端都可插入
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelList {
    labels: VecDeque<String>,
}

impl LabelList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已存在的标签不会重复插入，原有顺序保持不变。返回是否插入。
    pub fn add(&mut self, label: impl Into<String>, prepend: bool) -> bool {
        let label = label.into();
        if self.contains(&label) {
            return false;
        }
        if prepend {
            self.labels.push_front(label);
        } else {
            self.labels.push_back(label);
        }
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.labels.get(i).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// 用 `merged` 替换前两个标签，后面已有的同名标签被移除
    pub(crate) fn merge_first_two(&mut self, merged: String) {
        self.labels.pop_front();
        self.labels.pop_front();
        self.labels.retain(|l| *l != merged);
        self.labels.push_front(merged);
    }
}

impl<S: Into<String>> FromIterator<S> for LabelList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = LabelList::new();
        for l in iter {
            list.add(l, false);
        }
        list
    }
}

/// detail BED 中的一条注释，归属于名为 `name` 的转录本。
///
/// 解析时 `interval.strand` 为 Unstranded，join 时改写为所属转录本的链方向。
/// 派生的 `Ord` 先比区间再比名称，即 detail BED 的输出顺序。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TranscriptAnnotation {
    pub interval: ChromosomeInterval,
    pub name: String,
    pub labels: LabelList,
    /// itemRgb，空串表示无颜色
    pub color: String,
}

impl TranscriptAnnotation {
    pub fn new(interval: ChromosomeInterval, name: impl Into<String>, labels: LabelList) -> Self {
        Self { interval, name: name.into(), labels, color: String::new() }
    }

    /// 拆分 `label1/.../labelN/transcriptName`：最后一段为转录本名，其余为标签
    pub fn from_composite_label(interval: ChromosomeInterval, composite: &str) -> Self {
        let mut parts: Vec<&str> = composite.split('/').collect();
        let name = parts.pop().unwrap_or_default();
        Self::new(interval, name, parts.into_iter().collect())
    }

    pub fn add_label(&mut self, label: impl Into<String>, prepend: bool) -> bool {
        self.labels.add(label, prepend)
    }

    pub fn composite_label(&self) -> String {
        let mut parts: Vec<&str> = self.labels.iter().collect();
        parts.push(&self.name);
        parts.join("/")
    }

    /// 无颜色时输出 4 列，否则输出 9 列
    pub fn bed_string(&self) -> String {
        let ci = &self.interval;
        if self.color.is_empty() {
            format!("{}\t{}\t{}\t{}", ci.chromosome, ci.start, ci.stop, self.composite_label())
        } else {
            format!(
                "{}\t{}\t{}\t{}\t0\t{}\t{}\t{}\t{}",
                ci.chromosome,
                ci.start,
                ci.stop,
                self.composite_label(),
                ci.strand,
                ci.start,
                ci.stop,
                self.color,
            )
        }
    }
}
