//! mentionkit - 内联触发式自动补全引擎
//!
//! 模块结构：
//! - kernel: 无界面核心（state/action/effect/store），单词提取、匹配、提交计算
//! - app: 宿主适配层（Document、PopupView、Plugin）

pub mod app;
pub mod kernel;
