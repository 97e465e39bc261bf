use phf::{Set, phf_set};

pub(crate) const GENERIC_TLDS: Set<&'static str> = phf_set! {
    "com", "net", "org", "edu", "gov", "mil", "int", "info", "biz", "name", "pro",
    "aero", "asia", "cat", "coop", "jobs", "mobi", "museum", "post", "tel", "travel",
    "xxx", "app", "dev", "shop", "store", "online", "site", "xyz", "top", "club",
    "tech", "space", "website", "live", "life", "world", "today", "news", "blog",
    "cloud", "email", "digital", "agency", "company", "solutions", "services",
    "network", "systems", "media", "studio", "design", "art", "music", "photo",
    "photography", "link", "click", "page", "one", "group", "global", "center",
    "business", "consulting", "finance", "capital", "money", "bank", "insurance",
    "law", "legal", "health", "care", "clinic", "academy", "school", "education",
    "university", "college", "science", "engineering", "software", "codes",
    "tools", "zone", "work", "works", "run", "land", "city", "london", "berlin",
    "paris", "nyc", "tokyo", "amsterdam", "vegas", "wtf", "fun", "lol", "love",
    "game", "games", "google", "amazon", "apple", "microsoft", "icu", "vip",
    "ltd", "llc", "inc", "gmbh", "plus", "team", "guru", "expert", "ninja",
    "rocks", "social", "chat", "review", "reviews", "market", "markets", "trade",
    "exchange", "house", "home", "realty", "properties", "rentals", "estate",
    "energy", "solar", "eco", "green", "bio", "earth", "wiki", "fyi", "help",
    "support", "tips", "how", "moe", "pub", "bar", "restaurant", "cafe",
    "coffee", "pizza", "kitchen", "recipes", "wine", "beer", "fashion",
    "clothing", "shoes", "jewelry", "style", "beauty", "hair", "fitness", "yoga",
    "golf", "football", "soccer", "tennis", "bike", "auto", "car", "cars", "taxi",
    "tours", "holiday", "vacations", "flights", "hotel", "host", "hosting",
    "domains", "web", "mail", "direct", "express", "delivery", "africa", "arpa",
    "bayern", "swiss", "quebec", "scot", "wales", "eus", "gal", "ruhr", "koeln",
    "hamburg", "wien", "tirol", "brussels", "vlaanderen", "nrw", "madrid",
    "barcelona", "istanbul", "moscow", "dubai", "sydney", "melbourne",
};

pub(crate) const COUNTRY_CODE_TLDS: Set<&'static str> = phf_set! {
    "ac", "ad", "ae", "af", "ag", "ai", "al", "am", "ao", "aq", "ar", "as", "at",
    "au", "aw", "ax", "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj",
    "bm", "bn", "bo", "br", "bs", "bt", "bw", "by", "bz", "ca", "cc", "cd", "cf",
    "cg", "ch", "ci", "ck", "cl", "cm", "cn", "co", "cr", "cu", "cv", "cw", "cx",
    "cy", "cz", "de", "dj", "dk", "dm", "do", "dz", "ec", "ee", "eg", "er", "es",
    "et", "eu", "fi", "fj", "fk", "fm", "fo", "fr", "ga", "gd", "ge", "gf", "gg",
    "gh", "gi", "gl", "gm", "gn", "gp", "gq", "gr", "gs", "gt", "gu", "gw", "gy",
    "hk", "hm", "hn", "hr", "ht", "hu", "id", "ie", "il", "im", "in", "io", "iq",
    "ir", "is", "it", "je", "jm", "jo", "jp", "ke", "kg", "kh", "ki", "km", "kn",
    "kp", "kr", "kw", "ky", "kz", "la", "lb", "lc", "li", "lk", "lr", "ls", "lt",
    "lu", "lv", "ly", "ma", "mc", "md", "me", "mg", "mh", "mk", "ml", "mm", "mn",
    "mo", "mp", "mq", "mr", "ms", "mt", "mu", "mv", "mw", "mx", "my", "mz", "na",
    "nc", "ne", "nf", "ng", "ni", "nl", "no", "np", "nr", "nu", "nz", "om", "pa",
    "pe", "pf", "pg", "ph", "pk", "pl", "pm", "pn", "pr", "ps", "pt", "pw", "py",
    "qa", "re", "ro", "rs", "ru", "rw", "sa", "sb", "sc", "sd", "se", "sg", "sh",
    "si", "sk", "sl", "sm", "sn", "so", "sr", "ss", "st", "su", "sv", "sx", "sy",
    "sz", "tc", "td", "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn", "to", "tr",
    "tt", "tv", "tw", "tz", "ua", "ug", "uk", "us", "uy", "uz", "va", "vc", "ve",
    "vg", "vi", "vn", "vu", "wf", "ws", "ye", "yt", "za", "zm", "zw",
};

pub(crate) const FREE_PROVIDERS: Set<&'static str> = phf_set! {
    "gmail.com", "googlemail.com", "yahoo.com", "yahoo.co.uk", "yahoo.fr",
    "ymail.com", "rocketmail.com", "hotmail.com", "hotmail.co.uk", "hotmail.fr",
    "outlook.com", "outlook.fr", "live.com", "live.fr", "msn.com", "aol.com",
    "icloud.com", "me.com", "mac.com", "mail.com", "gmx.com", "gmx.de", "gmx.net",
    "web.de", "protonmail.com", "proton.me", "pm.me", "zoho.com", "yandex.com",
    "yandex.ru", "mail.ru", "inbox.ru", "list.ru", "bk.ru", "qq.com", "163.com",
    "126.com", "sina.com", "yeah.net", "naver.com", "daum.net", "hanmail.net",
    "orange.fr", "free.fr", "laposte.net", "sfr.fr", "wanadoo.fr", "libero.it",
    "virgilio.it", "tutanota.com", "tuta.io", "fastmail.com", "hushmail.com",
    "rediffmail.com", "seznam.cz", "wp.pl", "o2.pl", "onet.pl", "t-online.de",
    "freenet.de", "comcast.net", "verizon.net", "att.net", "sbcglobal.net",
    "bellsouth.net", "cox.net", "earthlink.net", "btinternet.com", "sky.com",
    "virginmedia.com", "ntlworld.com", "shaw.ca", "rogers.com", "sympatico.ca",
    "bigpond.com", "optusnet.com.au",
};

pub(crate) const ROLE_ACCOUNTS: Set<&'static str> = phf_set! {
    "abuse", "accounts", "admin", "administrator", "billing", "careers",
    "compliance", "contact", "customerservice", "devnull", "dns", "feedback",
    "ftp", "hello", "help", "hostmaster", "hr", "info", "inoc", "ispfeedback",
    "ispsupport", "jobs", "legal", "list", "list-request", "mail", "maildaemon",
    "mailer-daemon", "marketing", "media", "no-reply", "noc", "noreply", "null",
    "office", "phish", "phishing", "postmaster", "press", "privacy", "registrar",
    "root", "sales", "security", "spam", "support", "sysadmin", "team", "tech",
    "undisclosed-recipients", "unsubscribe", "usenet", "uucp", "webmaster", "www",
};

/// Seed list for [`DisposableDomains`](crate::DisposableDomains); the
/// refresher extends it at runtime.
pub(crate) const DISPOSABLE_SEED: Set<&'static str> = phf_set! {
    "mailinator.com", "guerrillamail.com", "guerrillamail.net", "sharklasers.com",
    "10minutemail.com", "10minutemail.net", "tempmail.com", "temp-mail.org",
    "throwawaymail.com", "yopmail.com", "yopmail.fr", "trashmail.com",
    "trashmail.de", "getnada.com", "dispostable.com", "maildrop.cc",
    "mailnesia.com", "mintemail.com", "fakeinbox.com", "spamgourmet.com",
    "mytemp.email", "tempr.email", "discard.email", "emailondeck.com",
    "mohmal.com", "zzjbfwqi.shop", "mailcatch.com", "spambox.us", "burnermail.io",
};

/// Domains the typo suggester compares against, most common first so ties
/// resolve to the likelier intent.
pub(crate) const SUGGESTION_TARGETS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "aol.com",
    "live.com",
    "msn.com",
    "protonmail.com",
    "mail.com",
    "gmx.com",
    "gmx.de",
    "web.de",
    "yandex.ru",
    "mail.ru",
    "qq.com",
    "163.com",
    "orange.fr",
    "free.fr",
    "laposte.net",
    "comcast.net",
    "verizon.net",
    "att.net",
    "btinternet.com",
    "googlemail.com",
    "yahoo.co.uk",
    "hotmail.co.uk",
    "hotmail.fr",
    "yahoo.fr",
];
