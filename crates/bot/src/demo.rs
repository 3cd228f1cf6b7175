//! Template showcase replies, one per message shape.

use eatba_core::reply::{Action, CarouselCard, QuickReplyOption, ReplyPayload};

pub const BUTTONS_KEYWORD: &str = "按鈕sample";
pub const CAROUSEL_KEYWORD: &str = "輪播sample";
pub const CONFIRM_KEYWORD: &str = "確認sample";

const DEMO_IMAGE_URL: &str = "https://i.imgur.com/b9oaYpu.jpeg";
const DEMO_LINK: &str = "https://developers.line.biz/en/docs/messaging-api/";

/// Pick the demo payload requested by `text`.
pub fn select_demo(text: &str) -> ReplyPayload {
    if text.contains(BUTTONS_KEYWORD) {
        buttons_demo()
    } else if text.contains(CAROUSEL_KEYWORD) {
        carousel_demo()
    } else if text.contains(CONFIRM_KEYWORD) {
        confirm_demo()
    } else {
        quick_reply_demo()
    }
}

pub fn buttons_demo() -> ReplyPayload {
    ReplyPayload::ButtonMenu {
        title: "按鈕範例".into(),
        body: "這是一個按鈕樣板".into(),
        image_url: DEMO_IMAGE_URL.into(),
        actions: vec![
            Action::open_link("開啟文件", DEMO_LINK),
            Action::fixed_reply("回傳資料", "我按了回傳", "你按了回傳按鈕"),
            Action::send_text("傳送文字", "美食推薦"),
        ],
    }
}

pub fn carousel_demo() -> ReplyPayload {
    let card = |n: u32| CarouselCard {
        title: format!("輪播範例 {n}"),
        subtitle: format!("第 {n} 張卡片"),
        image_url: DEMO_IMAGE_URL.into(),
        actions: vec![
            Action::open_link("開啟文件", DEMO_LINK),
            Action::fixed_reply(
                "回傳資料",
                format!("我選了第 {n} 張"),
                format!("你選了第 {n} 張卡片"),
            ),
        ],
    };
    ReplyPayload::Carousel {
        columns: vec![card(1), card(2), card(3)],
    }
}

pub fn confirm_demo() -> ReplyPayload {
    ReplyPayload::ConfirmMenu {
        body: "確定要查看美食推薦嗎？".into(),
        confirm: Action::send_text("是", "美食推薦"),
        cancel: Action::send_text("否", "不用了"),
    }
}

pub fn quick_reply_demo() -> ReplyPayload {
    ReplyPayload::QuickReplyMenu {
        body: "這是快速回覆範例，請選擇一個選項".into(),
        options: vec![
            QuickReplyOption::new("美食推薦", "美食推薦"),
            QuickReplyOption::new("按鈕", BUTTONS_KEYWORD),
            QuickReplyOption::new("輪播", CAROUSEL_KEYWORD),
            QuickReplyOption::new("確認", CONFIRM_KEYWORD),
        ],
    }
}
