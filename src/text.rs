//! User-facing strings.  The bot speaks Arabic to its users; everything a Discord user can see
//! lives here so the wording stays consistent across plugins.

pub const PRESENCE: &str = "🤖 استخدم /help للمساعدة";

pub const SYSTEM_INSTRUCTION: &str = "أنت مساعد ذكي ومفيد في ديسكورد.
يمكنك:
- الإجابة على الأسئلة بدقة واحترافية
- البحث عن المعلومات وتقديمها بطريقة منظمة
- فهم السياق والمحادثات السابقة
- التعامل مع الأسئلة الصعبة والمعقدة
- الرد باللغة العربية أو الإنجليزية حسب لغة السؤال

كن مفيداً ودقيقاً في إجاباتك.";

// Response generation
pub const NO_ANSWER: &str = "عذراً، لم أتمكن من معالجة طلبك.";
pub const BACKEND_FAILURE: &str = "عذراً، حدث خطأ أثناء معالجة طلبك. الرجاء المحاولة مرة أخرى.";

// Passive messages
pub const GREETING: &str = "مرحباً! كيف يمكنني مساعدتك؟ 😊";
pub const MESSAGE_ERROR: &str = "❌ عذراً، حدث خطأ أثناء معالجة رسالتك. الرجاء المحاولة مرة أخرى.";

// Commands
pub const COMMAND_ERROR: &str = "❌ عذراً، حدث خطأ أثناء تنفيذ الأمر.";
pub const HISTORY_CLEARED: &str = "✅ تم مسح سجل المحادثة الخاص بك!";
pub const PING_PENDING: &str = "🏓 جاري الفحص...";
pub const PING_TITLE: &str = "🏓 Pong!";
pub const PING_REPLY_LATENCY: &str = "📨 زمن الرد";
pub const PING_GATEWAY_LATENCY: &str = "🌐 زمن الـ API";
pub const GUILD_ONLY: &str = "❌ هذا الأمر متاح فقط داخل السيرفرات.";
pub const CHANNELS_NONE: &str =
    "📋 لا توجد قنوات محددة للرد التلقائي.\nاستخدم `/setchannel` لتحديد قناة.";
pub const CHANNELS_HEADER: &str = "📋 القنوات المحددة للرد التلقائي:";
pub const CHANNELS_CLEARED: &str = "✅ تم إزالة جميع القنوات من الرد التلقائي!";

pub fn channel_enabled(mention: &str) -> String {
    format!(
        "✅ تم تحديد القناة {} للرد التلقائي!\n\nالآن البوت سيرد على جميع الرسائل في هذه القناة تلقائياً.",
        mention
    )
}

pub fn channel_disabled(mention: &str) -> String {
    format!("✅ تم إزالة القناة {} من الرد التلقائي!", mention)
}

// Help embed
pub const HELP_COLOR: u32 = 0x5865F2;
pub const PING_COLOR: u32 = 0x57F287;
pub const HELP_TITLE: &str = "🤖 مساعد ذكي - الأوامر المتاحة";
pub const HELP_DESCRIPTION: &str = "أنا بوت ذكي يستخدم Google Gemini AI للإجابة على أسئلتك";
pub const HELP_FOOTER: &str = "Powered by Google Gemini AI";
pub const HELP_FIELDS: [(&str, &str); 4] = [
    (
        "💬 الأوامر الأساسية",
        "`/ask` - اسأل البوت أي سؤال\n`/clear` - مسح سجل المحادثة\n`/ping` - فحص سرعة الاستجابة\n`/help` - عرض هذه الرسالة",
    ),
    (
        "⚙️ أوامر الإدارة",
        "`/setchannel` - تحديد قناة للرد التلقائي\n`/removechannel` - إزالة قناة من الرد التلقائي\n`/listchannels` - عرض القنوات المحددة\n`/clearallchannels` - إزالة جميع القنوات",
    ),
    (
        "✨ القدرات",
        "• الإجابة على الأسئلة المعقدة\n• فهم السياق والمحادثات السابقة\n• البحث عن المعلومات\n• الدعم باللغة العربية والإنجليزية\n• الرد التلقائي في القنوات المحددة",
    ),
    (
        "🎯 طريقة الاستخدام",
        "حدد قناة بأمر `/setchannel` ثم اكتب مباشرة في تلك القناة، البوت سيرد تلقائياً!",
    ),
];

// Slash command descriptions
pub const DESC_HELP: &str = "عرض قائمة الأوامر والمساعدة";
pub const DESC_ASK: &str = "اسأل البوت أي سؤال";
pub const DESC_ASK_QUESTION: &str = "اكتب سؤالك هنا";
pub const DESC_CLEAR: &str = "مسح سجل المحادثة الخاص بك";
pub const DESC_PING: &str = "فحص سرعة استجابة البوت";
pub const DESC_SETCHANNEL: &str = "تحديد قناة للرد التلقائي (البوت يرد على كل رسالة فيها)";
pub const DESC_SETCHANNEL_CHANNEL: &str = "القناة المراد تحديدها للرد التلقائي";
pub const DESC_REMOVECHANNEL: &str = "إزالة قناة من الرد التلقائي";
pub const DESC_REMOVECHANNEL_CHANNEL: &str = "القناة المراد إزالتها";
pub const DESC_LISTCHANNELS: &str = "عرض القنوات المحددة للرد التلقائي";
pub const DESC_CLEARALLCHANNELS: &str = "إزالة جميع القنوات من الرد التلقائي";
