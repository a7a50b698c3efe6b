use time::Date;

use crate::auth::repo_types::User;
use crate::html::{self, attr, text};
use crate::metrics;
use crate::profile::repo_types::CalorieStrategy;
use crate::profile::services::WeightHistory;

/// Everything the profile page shows.
pub struct Dashboard<'a> {
    pub user: &'a User,
    pub history: &'a WeightHistory,
    pub edit_weights: bool,
    pub message: &'a str,
    pub error: &'a str,
    pub today: Date,
}

impl Dashboard<'_> {
    pub fn show_weight_form(&self) -> bool {
        self.edit_weights || self.history.latest.is_none()
    }

    pub fn render(&self) -> String {
        let latest = self.history.latest.as_ref();
        let bmi = metrics::bmi_text(self.user.height, latest);
        let calories = metrics::calories_text(latest, self.history.fixed_baseline.as_ref(), self.today);

        let mut body = format!("<h1>Hello, {}</h1>", text(&self.user.username));
        body.push_str(&html::banner("success", self.message));
        body.push_str(&html::banner("error", self.error));

        body.push_str("<h2>Targets</h2><dl>");
        row(&mut body, "BMI", &bmi);
        row(&mut body, "Calories", &calories);
        body.push_str("</dl>");

        body.push_str("<h2>Profile</h2><dl>");
        row(&mut body, "Birth date", &metrics::date_display(self.user.birth_date));
        row(
            &mut body,
            "Height",
            &self
                .user
                .height
                .map(|h| format!("{h} cm"))
                .unwrap_or_else(|| "n/a".into()),
        );
        row(&mut body, "Weight", &metrics::weight_display(latest.map(|e| e.weight)));
        row(
            &mut body,
            "Goal weight",
            &metrics::weight_display(latest.and_then(|e| e.goal_weight)),
        );
        row(&mut body, "Goal date", &metrics::date_display(latest.and_then(|e| e.goal_date)));
        row(
            &mut body,
            "Strategy",
            metrics::strategy_display(latest.map(|e| e.calorie_strategy)),
        );
        row(
            &mut body,
            "Recorded at",
            &metrics::instant_display(latest.map(|e| e.recorded_at)),
        );
        body.push_str("</dl>");

        body.push_str("<form method=\"post\" action=\"/user\">");
        body.push_str(&format!(
            "<label for=\"birthDate\">Birth date</label>\
             <input id=\"birthDate\" name=\"birthDate\" type=\"date\" value=\"{}\">\
             <label for=\"height\">Height (cm)</label>\
             <input id=\"height\" name=\"height\" type=\"number\" min=\"1\" value=\"{}\">",
            attr(&metrics::date_value(self.user.birth_date)),
            self.user.height.map(|h| h.to_string()).unwrap_or_default(),
        ));
        if self.show_weight_form() {
            self.weight_fields(&mut body);
        }
        body.push_str("<button type=\"submit\">Save</button></form>");

        if !self.show_weight_form() {
            body.push_str("<p><a href=\"/user?edit=1\">Record a new weight</a></p>");
        }
        body.push_str(
            "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>",
        );
        html::page("Profile", &body)
    }

    fn weight_fields(&self, body: &mut String) {
        let latest = self.history.latest.as_ref();
        let strategy = latest.map(|e| e.calorie_strategy);
        let selected = |s: CalorieStrategy| if strategy == Some(s) { " selected" } else { "" };
        body.push_str(&format!(
            "<label for=\"weight\">Weight (kg)</label>\
             <input id=\"weight\" name=\"weight\" type=\"number\" step=\"0.01\" min=\"0.01\" value=\"{}\">\
             <label for=\"goalWeight\">Goal weight (kg)</label>\
             <input id=\"goalWeight\" name=\"goalWeight\" type=\"number\" step=\"0.01\" min=\"0.01\" value=\"{}\">\
             <label for=\"goalDate\">Goal date</label>\
             <input id=\"goalDate\" name=\"goalDate\" type=\"date\" value=\"{}\">\
             <label for=\"calorieStrategy\">Calorie strategy</label>\
             <select id=\"calorieStrategy\" name=\"calorieStrategy\">\
             <option value=\"DYNAMIC\"{}>Dynamic</option>\
             <option value=\"FIXED\"{}>Fixed</option>\
             </select>",
            attr(&metrics::weight_value(latest.map(|e| e.weight))),
            attr(&metrics::weight_value(latest.and_then(|e| e.goal_weight))),
            attr(&metrics::date_value(latest.and_then(|e| e.goal_date))),
            selected(CalorieStrategy::Dynamic),
            selected(CalorieStrategy::Fixed),
        ));
    }
}

fn row(body: &mut String, label: &str, value: &str) {
    body.push_str(&format!("<dt>{}</dt><dd>{}</dd>", text(label), text(value)));
}
