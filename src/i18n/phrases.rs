//! Fixed interface strings that are not part of `translations.json`.

use super::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    ReadMore,
    Featured,
    MinutesShort,
    LoadMore,
    Search,
    All,
    Categories,
    Tags,
    RecentPosts,
    LatestPosts,
    NoPosts,
    ClearFilters,
    NoDocs,
    ClearSearch,
    AllDocs,
    Contents,
    Previous,
    Next,
    CopyLink,
    CopyCode,
    Print,
    NoProjects,
    Technology,
    Status,
    GridView,
    ListView,
    SourceCode,
    LiveDemo,
    StatusActive,
    StatusDevelopment,
    StatusArchived,
    StatPosts,
    StatDocs,
    StatProjects,
    FieldName,
    FieldEmail,
    FieldSubject,
    FieldMessage,
    Send,
    Sending,
    FieldRequired,
    InvalidEmail,
    FormInvalid,
    SendSuccess,
    SendFailure,
}

impl Phrase {
    pub const fn text(self, lang: Lang) -> &'static str {
        let (tr, en) = self.pair();
        match lang {
            Lang::Tr => tr,
            Lang::En => en,
        }
    }

    const fn pair(self) -> (&'static str, &'static str) {
        match self {
            Self::ReadMore => ("Devamını Oku", "Read More"),
            Self::Featured => ("Öne Çıkan", "Featured"),
            Self::MinutesShort => ("dk", "min"),
            Self::LoadMore => ("Daha Fazla Yükle", "Load More"),
            Self::Search => ("Ara...", "Search..."),
            Self::All => ("Tümü", "All"),
            Self::Categories => ("Kategoriler", "Categories"),
            Self::Tags => ("Etiketler", "Tags"),
            Self::RecentPosts => ("Son Yazılar", "Recent Posts"),
            Self::LatestPosts => ("Son Blog Yazıları", "Latest Blog Posts"),
            Self::NoPosts => (
                "Aradığınız kriterlere uygun blog yazısı bulunamadı.",
                "No blog posts found matching your criteria.",
            ),
            Self::ClearFilters => ("Filtreleri Temizle", "Clear Filters"),
            Self::NoDocs => (
                "Aradığınız kriterlere uygun döküman bulunamadı.",
                "No documentation found matching your criteria.",
            ),
            Self::ClearSearch => ("Aramayı Temizle", "Clear Search"),
            Self::AllDocs => ("Tüm Dökümanlar", "All Documents"),
            Self::Contents => ("İçindekiler", "Contents"),
            Self::Previous => ("Önceki", "Previous"),
            Self::Next => ("Sonraki", "Next"),
            Self::CopyLink => ("Linki Kopyala", "Copy Link"),
            Self::CopyCode => ("Kodu Kopyala", "Copy Code"),
            Self::Print => ("Yazdır", "Print"),
            Self::NoProjects => (
                "Bu kategoride proje bulunamadı.",
                "No projects found in this category.",
            ),
            Self::Technology => ("Teknoloji", "Technology"),
            Self::Status => ("Durum", "Status"),
            Self::GridView => ("Izgara", "Grid"),
            Self::ListView => ("Liste", "List"),
            Self::SourceCode => ("Kaynak Kod", "Source Code"),
            Self::LiveDemo => ("Canlı Demo", "Live Demo"),
            Self::StatusActive => ("Aktif", "Active"),
            Self::StatusDevelopment => ("Geliştiriliyor", "In Development"),
            Self::StatusArchived => ("Arşivlendi", "Archived"),
            Self::StatPosts => ("Blog Yazısı", "Blog Posts"),
            Self::StatDocs => ("Döküman", "Documents"),
            Self::StatProjects => ("Proje", "Projects"),
            Self::FieldName => ("Ad Soyad", "Name"),
            Self::FieldEmail => ("E-posta", "Email"),
            Self::FieldSubject => ("Konu", "Subject"),
            Self::FieldMessage => ("Mesaj", "Message"),
            Self::Send => ("Gönder", "Send"),
            Self::Sending => ("Gönderiliyor...", "Sending..."),
            Self::FieldRequired => ("Bu alan zorunludur", "This field is required"),
            Self::InvalidEmail => (
                "Geçerli bir e-posta adresi girin",
                "Enter a valid email address",
            ),
            Self::FormInvalid => (
                "Lütfen tüm zorunlu alanları doğru şekilde doldurun.",
                "Please fill in all required fields correctly.",
            ),
            Self::SendSuccess => (
                "Mesajınız başarıyla gönderildi! En kısa sürede size dönüş yapacağız.",
                "Your message has been sent! We will get back to you as soon as possible.",
            ),
            Self::SendFailure => (
                "Mesaj gönderilirken bir hata oluştu. Lütfen tekrar deneyin.",
                "An error occurred while sending your message. Please try again.",
            ),
        }
    }
}

/// Label of a project status slug.
pub fn status_label(status: &str, lang: Lang) -> String {
    match status {
        "active" => Phrase::StatusActive.text(lang).to_owned(),
        "development" => Phrase::StatusDevelopment.text(lang).to_owned(),
        "archived" => Phrase::StatusArchived.text(lang).to_owned(),
        other => other.to_owned(),
    }
}

/// `3 proje` / `3 projects`.
pub fn project_count(count: usize, lang: Lang) -> String {
    match lang {
        Lang::Tr => format!("{count} proje"),
        Lang::En if count == 1 => "1 project".to_owned(),
        Lang::En => format!("{count} projects"),
    }
}
