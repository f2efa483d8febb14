//! The 114 surahs in mushaf order.

use serde::Serialize;

/// Where a surah was revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Revelation {
    Meccan,
    Medinan,
}

/// Static metadata for one surah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurahMeta {
    pub id: u16,
    pub name: &'static str,
    pub name_en: &'static str,
    pub meaning: &'static str,
    pub verses: u16,
    #[serde(rename = "type")]
    pub revelation: Revelation,
}

impl SurahMeta {
    const fn new(
        id: u16, name: &'static str, name_en: &'static str, meaning: &'static str, verses: u16,
        revelation: Revelation,
    ) -> Self {
        Self { id, name, name_en, meaning, verses, revelation }
    }
}

pub const SURAH_COUNT: usize = 114;

pub static SURAHS: [SurahMeta; SURAH_COUNT] = [
    SurahMeta::new(1, "الفاتحة", "Al-Fatihah", "The Opening", 7, Revelation::Meccan),
    SurahMeta::new(2, "البقرة", "Al-Baqarah", "The Cow", 286, Revelation::Medinan),
    SurahMeta::new(3, "آل عمران", "Ali 'Imran", "Family of Imran", 200, Revelation::Medinan),
    SurahMeta::new(4, "النساء", "An-Nisa", "The Women", 176, Revelation::Medinan),
    SurahMeta::new(5, "المائدة", "Al-Ma'idah", "The Table Spread", 120, Revelation::Medinan),
    SurahMeta::new(6, "الأنعام", "Al-An'am", "The Cattle", 165, Revelation::Meccan),
    SurahMeta::new(7, "الأعراف", "Al-A'raf", "The Heights", 206, Revelation::Meccan),
    SurahMeta::new(8, "الأنفال", "Al-Anfal", "The Spoils of War", 75, Revelation::Medinan),
    SurahMeta::new(9, "التوبة", "At-Tawbah", "The Repentance", 129, Revelation::Medinan),
    SurahMeta::new(10, "يونس", "Yunus", "Jonah", 109, Revelation::Meccan),
    SurahMeta::new(11, "هود", "Hud", "Hud", 123, Revelation::Meccan),
    SurahMeta::new(12, "يوسف", "Yusuf", "Joseph", 111, Revelation::Meccan),
    SurahMeta::new(13, "الرعد", "Ar-Ra'd", "The Thunder", 43, Revelation::Medinan),
    SurahMeta::new(14, "إبراهيم", "Ibrahim", "Abraham", 52, Revelation::Meccan),
    SurahMeta::new(15, "الحجر", "Al-Hijr", "The Rocky Tract", 99, Revelation::Meccan),
    SurahMeta::new(16, "النحل", "An-Nahl", "The Bee", 128, Revelation::Meccan),
    SurahMeta::new(17, "الإسراء", "Al-Isra", "The Night Journey", 111, Revelation::Meccan),
    SurahMeta::new(18, "الكهف", "Al-Kahf", "The Cave", 110, Revelation::Meccan),
    SurahMeta::new(19, "مريم", "Maryam", "Mary", 98, Revelation::Meccan),
    SurahMeta::new(20, "طه", "Taha", "Ta-Ha", 135, Revelation::Meccan),
    SurahMeta::new(21, "الأنبياء", "Al-Anbiya", "The Prophets", 112, Revelation::Meccan),
    SurahMeta::new(22, "الحج", "Al-Hajj", "The Pilgrimage", 78, Revelation::Medinan),
    SurahMeta::new(23, "المؤمنون", "Al-Mu'minun", "The Believers", 118, Revelation::Meccan),
    SurahMeta::new(24, "النور", "An-Nur", "The Light", 64, Revelation::Medinan),
    SurahMeta::new(25, "الفرقان", "Al-Furqan", "The Criterion", 77, Revelation::Meccan),
    SurahMeta::new(26, "الشعراء", "Ash-Shu'ara", "The Poets", 227, Revelation::Meccan),
    SurahMeta::new(27, "النمل", "An-Naml", "The Ant", 93, Revelation::Meccan),
    SurahMeta::new(28, "القصص", "Al-Qasas", "The Stories", 88, Revelation::Meccan),
    SurahMeta::new(29, "العنكبوت", "Al-Ankabut", "The Spider", 69, Revelation::Meccan),
    SurahMeta::new(30, "الروم", "Ar-Rum", "The Romans", 60, Revelation::Meccan),
    SurahMeta::new(31, "لقمان", "Luqman", "Luqman", 34, Revelation::Meccan),
    SurahMeta::new(32, "السجدة", "As-Sajdah", "The Prostration", 30, Revelation::Meccan),
    SurahMeta::new(33, "الأحزاب", "Al-Ahzab", "The Combined Forces", 73, Revelation::Medinan),
    SurahMeta::new(34, "سبأ", "Saba", "Sheba", 54, Revelation::Meccan),
    SurahMeta::new(35, "فاطر", "Fatir", "Originator", 45, Revelation::Meccan),
    SurahMeta::new(36, "يس", "Ya-Sin", "Ya Sin", 83, Revelation::Meccan),
    SurahMeta::new(37, "الصافات", "As-Saffat", "Those Ranged in Ranks", 182, Revelation::Meccan),
    SurahMeta::new(38, "ص", "Sad", "The Letter Sad", 88, Revelation::Meccan),
    SurahMeta::new(39, "الزمر", "Az-Zumar", "The Groups", 75, Revelation::Meccan),
    SurahMeta::new(40, "غافر", "Ghafir", "The Forgiver", 85, Revelation::Meccan),
    SurahMeta::new(41, "فصلت", "Fussilat", "Explained in Detail", 54, Revelation::Meccan),
    SurahMeta::new(42, "الشورى", "Ash-Shura", "The Consultation", 53, Revelation::Meccan),
    SurahMeta::new(43, "الزخرف", "Az-Zukhruf", "The Ornaments of Gold", 89, Revelation::Meccan),
    SurahMeta::new(44, "الدخان", "Ad-Dukhan", "The Smoke", 59, Revelation::Meccan),
    SurahMeta::new(45, "الجاثية", "Al-Jathiyah", "The Crouching", 37, Revelation::Meccan),
    SurahMeta::new(46, "الأحقاف", "Al-Ahqaf", "The Wind-Curved Sandhills", 35, Revelation::Meccan),
    SurahMeta::new(47, "محمد", "Muhammad", "Muhammad", 38, Revelation::Medinan),
    SurahMeta::new(48, "الفتح", "Al-Fath", "The Victory", 29, Revelation::Medinan),
    SurahMeta::new(49, "الحجرات", "Al-Hujurat", "The Rooms", 18, Revelation::Medinan),
    SurahMeta::new(50, "ق", "Qaf", "The Letter Qaf", 45, Revelation::Meccan),
    SurahMeta::new(51, "الذاريات", "Adh-Dhariyat", "The Winnowing Winds", 60, Revelation::Meccan),
    SurahMeta::new(52, "الطور", "At-Tur", "The Mount", 49, Revelation::Meccan),
    SurahMeta::new(53, "النجم", "An-Najm", "The Star", 62, Revelation::Meccan),
    SurahMeta::new(54, "القمر", "Al-Qamar", "The Moon", 55, Revelation::Meccan),
    SurahMeta::new(55, "الرحمن", "Ar-Rahman", "The Beneficent", 78, Revelation::Medinan),
    SurahMeta::new(56, "الواقعة", "Al-Waqi'ah", "The Inevitable", 96, Revelation::Meccan),
    SurahMeta::new(57, "الحديد", "Al-Hadid", "The Iron", 29, Revelation::Medinan),
    SurahMeta::new(58, "المجادلة", "Al-Mujadila", "She That Disputeth", 22, Revelation::Medinan),
    SurahMeta::new(59, "الحشر", "Al-Hashr", "The Exile", 24, Revelation::Medinan),
    SurahMeta::new(60, "الممتحنة", "Al-Mumtahanah", "She That Is Examined", 13, Revelation::Medinan),
    SurahMeta::new(61, "الصف", "As-Saf", "The Ranks", 14, Revelation::Medinan),
    SurahMeta::new(62, "الجمعة", "Al-Jumu'ah", "The Congregation", 11, Revelation::Medinan),
    SurahMeta::new(63, "المنافقون", "Al-Munafiqun", "The Hypocrites", 11, Revelation::Medinan),
    SurahMeta::new(64, "التغابن", "At-Taghabun", "The Mutual Disillusion", 18, Revelation::Medinan),
    SurahMeta::new(65, "الطلاق", "At-Talaq", "The Divorce", 12, Revelation::Medinan),
    SurahMeta::new(66, "التحريم", "At-Tahrim", "The Prohibition", 12, Revelation::Medinan),
    SurahMeta::new(67, "الملك", "Al-Mulk", "The Sovereignty", 30, Revelation::Meccan),
    SurahMeta::new(68, "القلم", "Al-Qalam", "The Pen", 52, Revelation::Meccan),
    SurahMeta::new(69, "الحاقة", "Al-Haqqah", "The Reality", 52, Revelation::Meccan),
    SurahMeta::new(70, "المعارج", "Al-Ma'arij", "The Ascending Stairways", 44, Revelation::Meccan),
    SurahMeta::new(71, "نوح", "Nuh", "Noah", 28, Revelation::Meccan),
    SurahMeta::new(72, "الجن", "Al-Jinn", "The Jinn", 28, Revelation::Meccan),
    SurahMeta::new(73, "المزمل", "Al-Muzzammil", "The Enshrouded One", 20, Revelation::Meccan),
    SurahMeta::new(74, "المدثر", "Al-Muddaththir", "The Cloaked One", 56, Revelation::Meccan),
    SurahMeta::new(75, "القيامة", "Al-Qiyamah", "The Resurrection", 40, Revelation::Meccan),
    SurahMeta::new(76, "الإنسان", "Al-Insan", "The Man", 31, Revelation::Medinan),
    SurahMeta::new(77, "المرسلات", "Al-Mursalat", "The Emissaries", 50, Revelation::Meccan),
    SurahMeta::new(78, "النبأ", "An-Naba", "The Tidings", 40, Revelation::Meccan),
    SurahMeta::new(79, "النازعات", "An-Nazi'at", "Those Who Drag Forth", 46, Revelation::Meccan),
    SurahMeta::new(80, "عبس", "Abasa", "He Frowned", 42, Revelation::Meccan),
    SurahMeta::new(81, "التكوير", "At-Takwir", "The Overthrowing", 29, Revelation::Meccan),
    SurahMeta::new(82, "الانفطار", "Al-Infitar", "The Cleaving", 19, Revelation::Meccan),
    SurahMeta::new(83, "المطففين", "Al-Mutaffifin", "Defrauding", 36, Revelation::Meccan),
    SurahMeta::new(84, "الانشقاق", "Al-Inshiqaq", "The Sundering", 25, Revelation::Meccan),
    SurahMeta::new(85, "البروج", "Al-Buruj", "The Mansions of the Stars", 22, Revelation::Meccan),
    SurahMeta::new(86, "الطارق", "At-Tariq", "The Nightcomer", 17, Revelation::Meccan),
    SurahMeta::new(87, "الأعلى", "Al-A'la", "The Most High", 19, Revelation::Meccan),
    SurahMeta::new(88, "الغاشية", "Al-Ghashiyah", "The Overwhelming", 26, Revelation::Meccan),
    SurahMeta::new(89, "الفجر", "Al-Fajr", "The Dawn", 30, Revelation::Meccan),
    SurahMeta::new(90, "البلد", "Al-Balad", "The City", 20, Revelation::Meccan),
    SurahMeta::new(91, "الشمس", "Ash-Shams", "The Sun", 15, Revelation::Meccan),
    SurahMeta::new(92, "الليل", "Al-Layl", "The Night", 21, Revelation::Meccan),
    SurahMeta::new(93, "الضحى", "Ad-Duhaa", "The Morning Hours", 11, Revelation::Meccan),
    SurahMeta::new(94, "الشرح", "Ash-Sharh", "The Relief", 8, Revelation::Meccan),
    SurahMeta::new(95, "التين", "At-Tin", "The Fig", 8, Revelation::Meccan),
    SurahMeta::new(96, "العلق", "Al-Alaq", "The Clot", 19, Revelation::Meccan),
    SurahMeta::new(97, "القدر", "Al-Qadr", "The Power", 5, Revelation::Meccan),
    SurahMeta::new(98, "البينة", "Al-Bayyinah", "The Clear Proof", 8, Revelation::Medinan),
    SurahMeta::new(99, "الزلزلة", "Az-Zalzalah", "The Earthquake", 8, Revelation::Medinan),
    SurahMeta::new(100, "العاديات", "Al-Adiyat", "The Chargers", 11, Revelation::Meccan),
    SurahMeta::new(101, "القارعة", "Al-Qari'ah", "The Calamity", 11, Revelation::Meccan),
    SurahMeta::new(102, "التكاثر", "At-Takathur", "The Rivalry in Worldly Increase", 8, Revelation::Meccan),
    SurahMeta::new(103, "العصر", "Al-Asr", "The Declining Day", 3, Revelation::Meccan),
    SurahMeta::new(104, "الهمزة", "Al-Humazah", "The Traducer", 9, Revelation::Meccan),
    SurahMeta::new(105, "الفيل", "Al-Fil", "The Elephant", 5, Revelation::Meccan),
    SurahMeta::new(106, "قريش", "Quraysh", "Quraysh", 4, Revelation::Meccan),
    SurahMeta::new(107, "الماعون", "Al-Ma'un", "The Small Kindnesses", 7, Revelation::Meccan),
    SurahMeta::new(108, "الكوثر", "Al-Kawthar", "The Abundance", 3, Revelation::Meccan),
    SurahMeta::new(109, "الكافرون", "Al-Kafirun", "The Disbelievers", 6, Revelation::Meccan),
    SurahMeta::new(110, "النصر", "An-Nasr", "The Divine Support", 3, Revelation::Medinan),
    SurahMeta::new(111, "المسد", "Al-Masad", "The Palm Fiber", 5, Revelation::Meccan),
    SurahMeta::new(112, "الإخلاص", "Al-Ikhlas", "The Sincerity", 4, Revelation::Meccan),
    SurahMeta::new(113, "الفلق", "Al-Falaq", "The Daybreak", 5, Revelation::Meccan),
    SurahMeta::new(114, "الناس", "An-Nas", "Mankind", 6, Revelation::Meccan),
];

/// Look up a surah by its 1-based number.
pub fn surah(id: u16) -> Option<&'static SurahMeta> {
    SURAHS.get(usize::from(id).checked_sub(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ordered_and_complete() {
        for (index, meta) in SURAHS.iter().enumerate() {
            assert_eq!(usize::from(meta.id), index + 1);
            assert!(meta.verses > 0);
        }
    }

    #[test]
    fn test_total_verse_count() {
        let total: u32 = SURAHS.iter().map(|s| u32::from(s.verses)).sum();
        assert_eq!(total, 6236);
    }

    #[test]
    fn test_lookup_bounds() {
        assert_eq!(surah(1).map(|s| s.name_en), Some("Al-Fatihah"));
        assert_eq!(surah(2).map(|s| s.verses), Some(286));
        assert_eq!(surah(114).map(|s| s.name_en), Some("An-Nas"));
        assert!(surah(0).is_none());
        assert!(surah(115).is_none());
    }
}
