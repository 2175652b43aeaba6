//! HTML for the search pages.
//!
//! Everything here is string assembly; the state behind each control comes
//! from the `search` module.

use axum::response::Html;

use crate::models::Car;
use crate::search::{
    filter::{FilterState, MAKE_KEY, MAX_PRICE_KEY, MIN_PRICE_KEY, MODEL_KEY, PAGE_KEY},
    form::price_options,
    pagination::{PageItem, PageItemKind, Pagination},
    types::{Layout, SelectOption},
    SearchForm,
};

use super::MODELS_PATH;

const CSS: &str = r#"
*{box-sizing:border-box}body{margin:0;font-family:system-ui,sans-serif;background:#f4f5f7;color:#1f2328}
.nav{background:#1f2328;padding:1rem 2rem}.nav a{color:#fff;text-decoration:none;font-weight:600}
.container{max-width:1100px;margin:2rem auto;padding:0 1rem}
.paper{background:#fff;border-radius:8px;box-shadow:0 2px 8px rgba(0,0,0,.15);padding:1.5rem;max-width:500px;margin:auto}
.grid{display:grid;gap:1rem}.grid.two-column{grid-template-columns:1fr 1fr}
.field label{display:block;font-size:.85rem;color:#57606a;margin-bottom:.25rem}
.field select{width:100%;padding:.5rem}.full{grid-column:1/-1}
button{width:100%;padding:.6rem;background:#0969da;color:#fff;border:0;border-radius:4px;font-weight:600}
.results-layout{display:grid;grid-template-columns:320px 1fr;gap:2rem}
.car{background:#fff;border-radius:8px;padding:1rem;margin-bottom:1rem}.car .price{font-weight:700}
.pagination{display:flex;gap:.25rem;list-style:none;padding:0}
.pagination a,.pagination span{display:block;padding:.4rem .7rem;border-radius:4px;text-decoration:none}
.pagination .selected{background:#0969da;color:#fff}.pagination .disabled{color:#8c959f}
"#;

/// Client side of the search form.
///
/// Refetches the model list when the make changes, reusing responses for
/// the TTL. Forms and links marked `data-shallow` update the URL with
/// `history.pushState` and swap in the new results instead of reloading.
const SEARCH_SCRIPT: &str = r#"
(function(){
  var form=document.getElementById('search-form');if(!form)return;
  var make=form.elements['make'],model=form.elements['model'],cache={};
  function apply(models){
    var current=model.value;
    model.options.length=1;
    models.forEach(function(m){model.add(new Option(m.model+' ('+m.count+')',m.model));});
    model.value=models.some(function(m){return m.model===current;})?current:'all';
  }
  make.addEventListener('change',function(){
    var key=make.value,hit=cache[key],now=Date.now(),wanted=key;
    if(hit&&now-hit.at<TTL_MS){apply(hit.models);return;}
    fetch('MODELS_PATH?make='+encodeURIComponent(key)).then(function(r){return r.json();})
      .then(function(models){cache[key]={models:models,at:now};if(make.value===wanted)apply(models);});
  });
  function navigate(href,push){
    var results=document.querySelector('.results');
    if(!results){window.location.assign(href);return;}
    if(push)history.pushState(null,'',href);
    fetch(href).then(function(r){return r.text();}).then(function(html){
      var next=new DOMParser().parseFromString(html,'text/html').querySelector('.results');
      if(next)results.innerHTML=next.innerHTML;
    });
  }
  if(form.dataset.shallow==='true'){
    form.addEventListener('submit',function(e){
      e.preventDefault();
      var params=new URLSearchParams();
      form.dataset.keys.split(',').forEach(function(key){params.set(key,form.elements[key].value);});
      navigate(form.getAttribute('action')+'?'+params.toString(),true);
    });
  }
  document.addEventListener('click',function(e){
    var link=e.target.closest('a[data-shallow="true"]');if(!link)return;
    e.preventDefault();
    navigate(link.getAttribute('href'),true);
  });
  window.addEventListener('popstate',function(){navigate(location.pathname+location.search,false);});
})();
"#;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn page(title: &str, body: &str, models_ttl_secs: u32) -> Html<String> {
    let script = SEARCH_SCRIPT
        .replace("TTL_MS", &(u64::from(models_ttl_secs) * 1000).to_string())
        .replace("MODELS_PATH", MODELS_PATH);

    Html(format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title><style>{CSS}</style></head>
<body><nav class="nav"><a href="/">Car Search</a></nav><main class="container">{body}</main><script>{script}</script></body></html>"#,
        title = escape(title),
    ))
}

fn select(name: &str, id: &str, label: &str, options: &[SelectOption]) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            format!(
                r#"<option value="{value}"{selected}>{label}</option>"#,
                value = escape(&option.value),
                selected = if option.selected { " selected" } else { "" },
                label = escape(&option.label),
            )
        })
        .collect();

    format!(
        r#"<div class="field"><label for="{id}">{label}</label><select id="{id}" name="{name}">{options}</select></div>"#
    )
}

/// The filter form.
///
/// Target path, submitted keys and the reset page all come from
/// [`SearchForm::submit`], so a submission always lands on page 1.
pub fn search_form(
    form: &SearchForm,
    values: &FilterState,
    model_options: &[SelectOption],
) -> String {
    let layout = match form.layout {
        Layout::SingleColumn => "single-column",
        Layout::TwoColumn => "two-column",
    };
    let navigation = SearchForm::submit(values);
    let keys: Vec<&str> = navigation.query.keys().collect();

    format!(
        r#"<form id="search-form" class="paper" method="get" action="{action}" data-shallow="{shallow}" data-keys="{keys}">
<div class="grid {layout}">{make}{model}{min}{max}
<input type="hidden" name="{PAGE_KEY}" value="{page}"><div class="full"><button type="submit">Search</button></div></div></form>"#,
        action = escape(&navigation.pathname),
        shallow = navigation.shallow,
        keys = escape(&keys.join(",")),
        page = escape(&navigation.query.get_str(PAGE_KEY)),
        make = select(MAKE_KEY, "search-make", "Make", &form.make_options(&values.make)),
        model = select(MODEL_KEY, "search-model", "Model", model_options),
        min = select(
            MIN_PRICE_KEY,
            "search-min-price",
            "Min Price",
            &price_options("No Min", &values.min_price),
        ),
        max = select(
            MAX_PRICE_KEY,
            "search-max-price",
            "Max Price",
            &price_options("No Max", &values.max_price),
        ),
    )
}

fn car_card(car: &Car) -> String {
    format!(
        r#"<article class="car"><h3>{make} {model}</h3><div class="price">${price}</div>
<div class="specs">{year} · {km} km · {fuel}</div><p>{details}</p></article>"#,
        make = escape(&car.make),
        model = escape(&car.model),
        price = car.price,
        year = car.year,
        km = car.kilometers,
        fuel = escape(&car.fuel_type),
        details = escape(&car.details),
    )
}

pub fn car_cards(cars: &[Car]) -> String {
    if cars.is_empty() {
        return r#"<p class="empty">No cars match your search.</p>"#.to_string();
    }
    cars.iter().map(car_card).collect()
}

fn page_item(item: &PageItem) -> String {
    let text = match item.kind {
        PageItemKind::Previous => "‹".to_string(),
        PageItemKind::Next => "›".to_string(),
        PageItemKind::Page => item.page.to_string(),
    };

    if item.disabled {
        return format!(r#"<li><span class="disabled">{text}</span></li>"#);
    }

    let class = if item.selected { r#" class="selected""# } else { "" };
    let shallow = if item.shallow { r#" data-shallow="true""# } else { "" };
    format!(
        r#"<li><a href="{href}"{class}{shallow}>{text}</a></li>"#,
        href = escape(&item.href),
    )
}

pub fn pagination(pagination: &Pagination) -> String {
    if pagination.total_pages == 0 {
        return String::new();
    }

    let items: String = pagination.items.iter().map(page_item).collect();
    format!(r#"<nav><ul class="pagination">{items}</ul></nav>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::QueryParams;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn page_links_are_escaped() {
        let pages = Pagination::new(&QueryParams::parse("make=Honda&minPrice=1000"), 2);
        let html = pagination(&pages);

        assert!(html.contains(r#"href="/cars?make=Honda&amp;minPrice=1000&amp;page=2""#));
    }

    #[test]
    fn page_links_are_shallow() {
        let pages = Pagination::new(&QueryParams::parse("page=1"), 2);
        let html = pagination(&pages);

        assert!(html.contains(r#"<a href="/cars?page=2" data-shallow="true">2</a>"#));
    }

    #[test]
    fn search_form_is_driven_by_submit_navigation() {
        let form = SearchForm::new(vec![], vec![], true);
        let values = FilterState {
            page: 4,
            ..FilterState::default()
        };
        let html = search_form(&form, &values, &[]);

        assert!(html.contains(r#"action="/cars""#));
        assert!(html.contains(r#"data-shallow="true""#));
        assert!(html.contains(r#"data-keys="make,model,minPrice,maxPrice,page""#));
        assert!(html.contains(r#"<input type="hidden" name="page" value="1">"#));
    }

    #[test]
    fn page_embeds_search_script() {
        let Html(html) = page("Cars", "", 60);

        assert!(html.contains("'/api/models?make='"));
        assert!(html.contains("now-hit.at<60000"));
        assert!(html.contains("history.pushState"));
        assert!(!html.contains("TTL_MS"));
        assert!(!html.contains("MODELS_PATH"));
    }

    #[test]
    fn empty_results_render_message() {
        assert!(car_cards(&[]).contains("No cars match"));
    }
}
