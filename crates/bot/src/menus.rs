//! Fixed reply texts and menus.

use crate::router::HASHTAG;
use eatba_core::catalog::{DistrictGroups, MealTime};
use eatba_core::reply::{Action, QuickReplyOption, ReplyPayload};

pub const MENU_TITLE: &str = "歡迎使用!!";
pub const MENU_BODY: &str = "請選擇要推薦的風格餐廳。";
pub const MENU_IMAGE_URL: &str = "https://i.imgur.com/b9oaYpu.jpeg";
pub const DISTRICT_PROMPT: &str = "請選擇你的所在區域~";
pub const GUIDANCE: &str = "想吃什麼，就大聲說出來吧！輸入『美食推薦』，我來滿足你的味蕾！";
pub const WELCOME: &str =
    "嗨！歡迎加入台中美食小幫手！想找美食嗎？輸入「美食推薦」就能開始你的美食探索之旅囉！";
pub const NO_DATA: &str = "找不到餐廳資料，請稍後再試！";

/// The meal-time button menu: one button per meal time.
pub fn meal_menu() -> ReplyPayload {
    ReplyPayload::ButtonMenu {
        title: MENU_TITLE.into(),
        body: MENU_BODY.into(),
        image_url: MENU_IMAGE_URL.into(),
        actions: MealTime::ALL
            .into_iter()
            .map(|meal| Action::send_text(meal.label(), meal.hashtag()))
            .collect(),
    }
}

/// Quick replies listing every district of a partition as `#<district>`.
pub fn district_menu(groups: &DistrictGroups) -> ReplyPayload {
    ReplyPayload::QuickReplyMenu {
        body: DISTRICT_PROMPT.into(),
        options: groups
            .districts()
            .map(|district| QuickReplyOption::new(district, format!("{HASHTAG}{district}")))
            .collect(),
    }
}

pub fn guidance() -> ReplyPayload {
    ReplyPayload::text(GUIDANCE)
}

pub fn welcome() -> ReplyPayload {
    ReplyPayload::text(WELCOME)
}

pub fn no_data() -> ReplyPayload {
    ReplyPayload::text(NO_DATA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eatba_core::catalog::RestaurantRecord;

    #[test]
    fn meal_menu_has_three_hashtag_buttons() {
        let ReplyPayload::ButtonMenu { title, actions, image_url, .. } = meal_menu() else {
            panic!("expected a button menu");
        };
        assert_eq!(title, MENU_TITLE);
        assert_eq!(image_url, MENU_IMAGE_URL);
        assert_eq!(
            actions,
            vec![
                Action::send_text("享用文青早點", "#文青早餐"),
                Action::send_text("品嘗在地美食", "#在地午餐"),
                Action::send_text("暢享高檔餐廳", "#高檔晚餐"),
            ]
        );
    }

    #[test]
    fn district_menu_lists_every_district() {
        let record = |district: &str| RestaurantRecord {
            name: "店".into(),
            opening_hours: "h".into(),
            phone: "p".into(),
            district: district.into(),
            address: "a".into(),
            review: "r".into(),
        };
        let groups =
            DistrictGroups::from_records(vec![record("西區"), record("北區"), record("西區")]);

        let ReplyPayload::QuickReplyMenu { body, options } = district_menu(&groups) else {
            panic!("expected quick replies");
        };
        assert_eq!(body, DISTRICT_PROMPT);
        assert_eq!(options.len(), 2);
        for option in &options {
            assert_eq!(option.value, format!("#{}", option.label));
        }
    }
}
