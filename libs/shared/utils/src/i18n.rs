use std::collections::HashMap;
use std::sync::OnceLock;

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "ar" => Locale::Ar,
            _ => Locale::En,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }
}

// One entry per string id: (id, English, Arabic).
const CATALOG: &[(&str, &str, &str)] = &[
    ("choose_kid", "Choose Kid", "أختر الطفل"),
    ("day_and_time", "Day and Time", "اليوم و التاريخ"),
    ("available_hours", "Available Hours", "المواعيد المتاحه"),
    ("apply", "Apply", "أختر موعد"),
    ("book", "Book", "احجز موعد"),
    ("no_slots_available", "No slots available", "لا توجد فتحات متاحة"),
    ("booking_confirmed", "Booking Confirmed", "تأكيد الحجز"),
    ("booking_to_kids_name", "Booking To Kids Name", "الحجز لاسم الاطفال"),
    ("kid_name", "Kid Name", "أسم الطفل"),
    ("date", "Date", "التاريخ"),
    ("day", "Day", "اليوم"),
    ("time", "Time", "الساعه"),
    ("doctor_name", "Doctor Name", "اسم الطبيب"),
    ("doctors", "Doctors", "أطباء العيادة"),
    ("home_page", "Home Page", "الصفحة الرئيسية"),
    (
        "select_child_prompt",
        "Please add or select a child",
        "يرجى إضافة أو اختيار طفل",
    ),
    (
        "select_slot_prompt",
        "Please select a time slot",
        "يرجى اختيار موعد",
    ),
    (
        "not_authenticated",
        "User not authenticated. Please log in again.",
        "الجلسة غير صالحة، يرجى تسجيل الدخول مرة أخرى",
    ),
    (
        "enter_valid_date",
        "Please enter a valid date.",
        "يرجى إدخال تاريخ صحيح",
    ),
    (
        "date_in_past",
        "The selected date is in the past.",
        "التاريخ المحدد قد مضى",
    ),
    (
        "duplicate_child",
        "This child is already selected.",
        "تم اختيار هذا الطفل مسبقًا",
    ),
    (
        "slot_fetch_failed",
        "Failed to fetch available slots",
        "تعذر جلب المواعيد المتاحة",
    ),
    (
        "booking_failed",
        "Failed to book the slot",
        "تعذر حجز الموعد",
    ),
    (
        "booking_success",
        "Your slot has been successfully booked!",
        "تم حجز موعدك بنجاح",
    ),
    ("invalid_data", "Invalid data", "بيانات غير صالحة"),
];

fn table() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    static TABLE: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        CATALOG
            .iter()
            .map(|(id, en, ar)| (*id, (*en, *ar)))
            .collect()
    })
}

/// Look up a display string by id. Unknown ids fall back to the id itself
/// so a missing entry shows up in the UI instead of panicking.
pub fn tr(locale: Locale, id: &str) -> &str {
    match table().get(id) {
        Some((en, ar)) => match locale {
            Locale::En => en,
            Locale::Ar => ar,
        },
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_both_locales() {
        assert_eq!(tr(Locale::En, "no_slots_available"), "No slots available");
        assert_eq!(tr(Locale::Ar, "no_slots_available"), "لا توجد فتحات متاحة");
    }

    #[test]
    fn unknown_id_falls_back_to_id() {
        assert_eq!(tr(Locale::En, "nope_not_here"), "nope_not_here");
    }

    #[test]
    fn locale_tag_parsing() {
        assert_eq!(Locale::from_tag("ar"), Locale::Ar);
        assert_eq!(Locale::from_tag("AR "), Locale::Ar);
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
    }
}
