//! Synthetic results-page markup for unit tests.

pub struct ItemSpec {
    pub name: Option<String>,
    pub times: Vec<String>,
    pub time_ahead: Option<String>,
    pub duration: Option<String>,
    pub stops: Option<String>,
    pub delay: Option<String>,
    pub price: Option<String>,
    pub impact_url: Option<String>,
}

impl ItemSpec {
    pub fn new(code: &str, number: &str) -> Self {
        Self {
            name: Some(format!("{} Airlines", code)),
            times: vec!["8:00 AM\n   on Fri, Nov 20".to_string(), "11:30 AM".to_string()],
            time_ahead: Some("+1".to_string()),
            duration: Some("5 hr 30 min".to_string()),
            stops: Some("Nonstop".to_string()),
            delay: None,
            price: Some("$1,234".to_string()),
            impact_url: Some(format!(
                "https://www.travelimpactmodel.org/lookup/flight?itinerary=JFK-LAX-{}-{}-20261120",
                code, number
            )),
        }
    }

    pub fn render(&self) -> String {
        let mut html = String::from("<li class=\"pIav2d\"><div class=\"JMc5Xc\">");
        if let Some(url) = &self.impact_url {
            html.push_str(&format!(
                "<div class=\"NZRfve\" data-travelimpactmodelwebsiteurl=\"{}\"></div>",
                url
            ));
        }
        if let Some(name) = &self.name {
            html.push_str(&format!(
                "<div class=\"sSHqwe tPgKwe ogfYpf\"><span> {} </span></div>",
                name
            ));
        }
        html.push_str("<span class=\"mv1WYe\">");
        for time in &self.times {
            html.push_str(&format!("<div>{}</div>", time));
        }
        html.push_str("</span>");
        if let Some(ahead) = &self.time_ahead {
            html.push_str(&format!("<span class=\"bOzv6\">{}</span>", ahead));
        }
        if let Some(duration) = &self.duration {
            html.push_str(&format!("<div class=\"Ak5kof\"><div>{}</div></div>", duration));
        }
        if let Some(stops) = &self.stops {
            html.push_str(&format!(
                "<div class=\"BbR8Ec\"><span class=\"ogfYpf\">{}</span></div>",
                stops
            ));
        }
        if let Some(delay) = &self.delay {
            html.push_str(&format!("<div class=\"GsCCve\">{}</div>", delay));
        }
        if let Some(price) = &self.price {
            html.push_str(&format!("<div class=\"YMlIz FpEdX\"><span>{}</span></div>", price));
        }
        html.push_str("</div></li>");
        html
    }
}

pub fn item(code: &str, number: &str) -> String {
    ItemSpec::new(code, number).render()
}

pub fn best_group(items: &[String]) -> String {
    format!(
        "<div jsname=\"IWWDBc\"><ul class=\"Rk10dc\">{}</ul></div>",
        items.concat()
    )
}

pub fn group(items: &[String]) -> String {
    format!(
        "<div jsname=\"YdtKid\"><ul class=\"Rk10dc\">{}</ul></div>",
        items.concat()
    )
}

pub fn results_page_with_price(current_price: &str, groups: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Flights</title></head><body>\
         <div jsname=\"qJTHM\" class=\"Tz7Ng\">\
         <span class=\"gOatQ\">{}</span>{}</div></body></html>",
        current_price,
        groups.concat()
    )
}

pub fn results_page(groups: &[String]) -> String {
    results_page_with_price("low", groups)
}

pub fn date_too_far_page(groups: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><body>\
         <div jsname=\"qJTHM\" class=\"FXkZv fXx9Lc\">Choose a date within 11 months</div>\
         {}</body></html>",
        groups.concat()
    )
}
