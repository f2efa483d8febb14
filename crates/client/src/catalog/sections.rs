//! Arabic titles for the English section names returned by the hadith API.

/// English title → Arabic title, sorted by English title.
static SECTION_NAMES: &[(&str, &str)] = &[
    ("Ablutions (Wudu')", "الوضوء"),
    ("Actions while Praying", "العمل في الصلاة"),
    ("Afflictions and the End of the World", "الفتن"),
    ("Agriculture", "المزارعة"),
    ("Apostates", "المرتدين"),
    ("Asking Permission", "الاستئذان"),
    ("Bathing (Ghusl)", "الغسل"),
    ("Beginning of Creation", "بدء الخلق"),
    ("Belief", "الإيمان"),
    ("Blood Money (Ad-Diyat)", "الديات"),
    ("Call to Prayers (Adhaan)", "الأذان"),
    ("Clothing and Adornments", "اللباس والزينة"),
    ("Commentary on the Quran", "تفسير القرآن"),
    ("Companions of the Prophet", "أصحاب النبي ﷺ"),
    ("Destiny", "القدر"),
    ("Divine Will (Al-Qadar)", "القدر"),
    ("Divorce", "الطلاق"),
    ("Dress", "اللباس"),
    ("Drinks", "الأشربة"),
    ("Eclipses", "الكسوف"),
    ("Faith", "الإيمان"),
    ("Fasting", "الصيام"),
    ("Fasts", "الصيام"),
    ("Fear Prayer", "صلاة الخوف"),
    ("Fighting for the Cause of Allah (Jihaad)", "الجهاد والسير"),
    ("Food and Drink", "الأشربة"),
    ("Food, Meals", "الأطعمة"),
    ("Forgetfulness in Prayer", "السهو"),
    ("Friday Prayer", "الجمعة"),
    ("Funerals (Al-Janaa'iz)", "الجنائز"),
    ("Gifts", "الهبة"),
    ("Good Manners and Form (Al-Adab)", "الأدب"),
    ("Government", "الإمارة"),
    ("Hajj (Pilgrimage)", "الحج"),
    ("Heart Melting Traditions", "التوبة"),
    ("Hiring", "الإجارة"),
    ("Holding Fast to the Qur'an and Sunnah", "الاعتصام بالكتاب والسنة"),
    ("Hunting and Slaughter", "الصيد والذبائح"),
    ("Hunting, Slaughtering", "الصيد والذبائح"),
    ("Inheritance", "الفرائض"),
    ("Interpretation of Dreams", "تعبير الرؤيا"),
    ("Introduction", "المقدمة"),
    ("Invocations", "الدعوات"),
    ("Invoking Allah for Rain (Istisqaa)", "الاستسقاء"),
    ("Jihad", "الجهاد والسير"),
    ("Judgments (Ahkaam)", "الأحكام"),
    ("Knowledge", "العلم"),
    ("Laws of Inheritance (Al-Faraa'id)", "الفرائض"),
    ("Limits and Punishments set by Allah (Hudood)", "الحدود"),
    ("Marriage", "النكاح"),
    ("Medicine", "الطب"),
    ("Menstrual Periods", "الحيض"),
    ("Menstruation", "الحيض"),
    ("Merits of the Helpers in Madinah (Ansaar)", "مناقب الأنصار"),
    ("Military Expeditions led by the Prophet (pbuh) (Al-Maghaazi)", "المغازي"),
    ("Oaths", "الأيمان"),
    ("Oaths and Vows", "الأيمان والنذور"),
    ("Oaths in Courts", "القسامة والمحاربين"),
    ("Obligatory Charity Tax (Zakat)", "الزكاة"),
    ("Oneness, Uniqueness of Allah (Tawheed)", "التوحيد"),
    ("Paradise", "الجنة وصفة نعيمها وأهلها"),
    ("Patients", "المرضى"),
    ("Peacemaking", "الصلح"),
    ("Penalty of Hunting while on Pilgrimage", "جزاء الصيد"),
    ("Pilgrimage", "الحج"),
    ("Pilgrims Prevented from Completing the Pilgrimage", "المحصر"),
    ("Prayer", "الصلاة"),
    ("Prayer at Night (Tahajjud)", "التهجد"),
    ("Prayers (Salat)", "الصلاة"),
    ("Praying at Night in Ramadaan (Taraweeh)", "التراويح"),
    ("Prophetic Commentary on the Qur'an (Tafseer of the Prophet (pbuh))", "التفسير"),
    ("Prophets", "الأنبياء"),
    ("Prostration During Recital of Qur'an", "سجود القرآن"),
    ("Punishments", "الحدود"),
    ("Purification (Kitab Al-Taharah)", "الطهارة"),
    ("Remembrance of Allah", "الذكر والدعاء"),
    ("Retiring to a Mosque for Remembrance of Allah (I'tikaf)", "الاعتكاف"),
    ("Revelation", "بدء الوحي"),
    ("Rubbing hands and feet with dust (Tayammum)", "التيمم"),
    ("Sales and Trade", "البيوع"),
    ("Shortening the Prayers (At-Taqseer)", "تقصير الصلاة"),
    ("Suckling", "الرضاع"),
    ("Supporting the Family", "النفقات"),
    ("The Two Festivals (Eids)", "العيدين"),
    ("Times of the Prayers", "مواقيت الصلاة"),
    ("To make the Heart Tender (Ar-Riqaq)", "الرقاق"),
    ("Transactions", "البيوع"),
    ("Tribulations", "الفتن وأشراط الساعة"),
    ("Virtue, Enjoining Good Manners", "البر والصلة والآداب"),
    ("Virtues and Merits of the Prophet (pbuh) and his Companions", "المناقب"),
    ("Virtues of Madinah", "فضائل المدينة"),
    ("Virtues of Prayer at Masjid Makkah and Madinah", "فضل الصلاة في مسجد مكة والمدينة"),
    ("Virtues of the Night of Qadr", "فضل ليلة القدر"),
    ("Virtues of the Qur'an", "فضائل القرآن"),
    ("Vows", "النذور"),
    ("Wedlock, Marriage (Nikaah)", "النكاح"),
    ("Wills and Testaments (Wasaayaa)", "الوصايا"),
    ("Witnesses", "الشهادات"),
    ("Witr Prayer", "الوتر"),
    ("Zakat", "الزكاة"),
    ("`Umrah (Minor pilgrimage)", "العمرة"),
];

/// Arabic title for an English section name, if one is known.
pub fn arabic_section_name(english: &str) -> Option<&'static str> {
    SECTION_NAMES
        .binary_search_by(|(key, _)| (*key).cmp(english))
        .ok()
        .map(|index| SECTION_NAMES[index].1)
}

/// Arabic title when known, otherwise the English title unchanged.
pub fn translate_section_name(english: &str) -> &str {
    arabic_section_name(english).unwrap_or(english)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sorted_for_binary_search() {
        assert!(SECTION_NAMES.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_known_names() {
        assert_eq!(arabic_section_name("Belief"), Some("الإيمان"));
        assert_eq!(arabic_section_name("Ablutions (Wudu')"), Some("الوضوء"));
    }

    #[test]
    fn test_unmapped_passes_through() {
        assert_eq!(arabic_section_name("Book of Something New"), None);
        assert_eq!(translate_section_name("Book of Something New"), "Book of Something New");
        assert_eq!(translate_section_name(""), "");
    }
}
