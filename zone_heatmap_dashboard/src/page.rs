// Static dashboard page and the client script that draws the heatmap plan on
// a 2D canvas. The script does no color math of its own: every fill, stroke
// and label position comes from `/api/heatmap`.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Zone Heatmap</title>
  <style>
    body { background:#0f172a; color:#e2e8f0; font-family: Inter, sans-serif; margin:24px; }
    section { margin-bottom:24px; }
    .legend { display:flex; gap:16px; align-items:center; }
    .chip { display:inline-block; width:14px; height:14px; border-radius:3px; margin-right:6px; vertical-align:middle; }
    table { border-collapse:collapse; }
    td, th { padding:4px 10px; text-align:left; border-bottom:1px solid #334155; }
    #status { font-family:monospace; font-size:12px; color:#94a3b8; }
  </style>
</head>
<body>
  <main>
    <h2>Zone Heatmap</h2>
    <p>Density visualization across zones <span id="status">loading</span></p>
    <section>
      <canvas id="heatmap" width="400" height="300" style="border:1px solid #334155; background:#1e293b"></canvas>
      <div id="legend" class="legend"></div>
    </section>
    <section>
      <h3>Zone Performance</h3>
      <select id="sort">
        <option value="totalFootfall">Sort by Footfall</option>
        <option value="density">Sort by Density</option>
        <option value="dwellTime">Sort by Dwell Time</option>
      </select>
      <table id="zones"></table>
    </section>
    <section>
      <h3>Flow Between Zones</h3>
      <table id="flows"></table>
    </section>
    <section>
      <h3>Safety Alerts</h3>
      <ul id="alerts"></ul>
    </section>
  </main>
  <script src="/client.js"></script>
</body>
</html>
"#;

pub const CLIENT_JS: &str = r#"(function(){
    const status = (t)=>{ const el=document.getElementById('status'); if(el) el.textContent=t; };
    const rgba = (c)=> `rgba(${Math.round(c.red)}, ${Math.round(c.green)}, ${Math.round(c.blue)}, ${c.alpha})`;
    const font = (f)=> `${f.bold ? 'bold ' : ''}${f.sizePx}px Inter, sans-serif`;
    const escapeHtml = (v)=> String(v)
        .replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;')
        .replace(/"/g, '&quot;').replace(/'/g, '&#39;');

    function drawLabel(ctx, label){
        ctx.fillStyle = rgba(label.color);
        ctx.font = font(label.font);
        ctx.textAlign = 'center';
        ctx.fillText(label.text, label.position[0], label.position[1]);
    }

    function drawPlan(canvas, plan){
        const ctx = canvas.getContext('2d');
        if(!ctx) return;
        ctx.clearRect(0, 0, canvas.width, canvas.height);
        plan.forEach((ins)=>{
            ctx.fillStyle = rgba(ins.fill);
            ctx.strokeStyle = rgba(ins.stroke);
            ctx.lineWidth = ins.strokeWidth;
            ctx.beginPath();
            ins.path.forEach((p, i)=>{ if(i===0){ ctx.moveTo(p[0], p[1]); } else { ctx.lineTo(p[0], p[1]); } });
            ctx.closePath();
            ctx.fill();
            ctx.stroke();
            drawLabel(ctx, ins.nameLabel);
            drawLabel(ctx, ins.densityLabel);
        });
    }

    function drawLegend(entries){
        const el = document.getElementById('legend');
        if(!el) return;
        el.innerHTML = entries.map((e)=> `<span><span class="chip" style="background:${escapeHtml(e.swatch)}"></span>${escapeHtml(e.label)}</span>`).join('');
    }

    async function loadHeatmap(){
        const res = await fetch('/api/heatmap');
        const body = await res.json();
        if(!body.success){ status(String(body.error)); return; }
        const canvas = document.getElementById('heatmap');
        canvas.width = body.metadata.canvas.width;
        canvas.height = body.metadata.canvas.height;
        drawPlan(canvas, body.data);
        drawLegend(body.metadata.legend);
    }

    async function loadZones(){
        const sortBy = document.getElementById('sort').value;
        const res = await fetch(`/api/analytics/zones/performance?sortBy=${encodeURIComponent(sortBy)}`);
        const body = await res.json();
        const rows = body.data.map((z)=> `<tr><td>${escapeHtml(z.rank)}</td><td>${escapeHtml(z.name)}</td><td>${escapeHtml(z.levelLabel)}</td><td>${escapeHtml(z.density.toFixed(1))} p/m²</td><td>${escapeHtml(z.dwellTime)}</td><td>${escapeHtml(z.totalFootfall.toLocaleString())}</td></tr>`);
        document.getElementById('zones').innerHTML = '<tr><th>#</th><th>Zone</th><th>Level</th><th>Density</th><th>Dwell</th><th>Footfall</th></tr>' + rows.join('');
    }

    async function loadFlows(){
        const res = await fetch('/api/analytics/flow');
        const body = await res.json();
        const rows = body.summary.rows.map((f)=> `<tr><td>${escapeHtml(f.sourceName)}</td><td>&rarr;</td><td>${escapeHtml(f.targetName)}</td><td>${escapeHtml(f.count)}</td><td>${escapeHtml(f.percentOfMax.toFixed(0))}% of max flow</td></tr>`);
        document.getElementById('flows').innerHTML = rows.join('') + `<tr><th colspan="3">Total movements</th><th>${escapeHtml(body.summary.total.toLocaleString())}</th><th></th></tr>`;
    }

    async function loadAlerts(){
        const res = await fetch('/api/alerts/safety');
        const body = await res.json();
        const el = document.getElementById('alerts');
        if(body.data.length === 0){ el.innerHTML = '<li>All clear</li>'; return; }
        el.innerHTML = body.data.map((a)=> `<li>[${escapeHtml(a.severity.toUpperCase())}] ${escapeHtml(a.message)} (${escapeHtml(new Date(a.timestamp).toLocaleTimeString())})</li>`).join('');
    }

    document.getElementById('sort').onchange = loadZones;
    Promise.all([loadHeatmap(), loadZones(), loadFlows(), loadAlerts()])
        .then(()=> status('live'))
        .catch((e)=> status(`error: ${e}`));
    setInterval(()=>{ loadAlerts().catch(()=>{}); }, 10000);
})();"#;

#[cfg(test)]
mod tests {
    use super::*;

    // Every value interpolated into markup must pass through `escapeHtml`.
    #[test]
    fn client_escapes_interpolated_markup() {
        assert!(CLIENT_JS.contains("const escapeHtml"));
        for line in CLIENT_JS.lines().filter(|l| l.contains("innerHTML") || l.contains("=> `<")) {
            let mut rest = line;
            while let Some(start) = rest.find("${") {
                let inner = &rest[start + 2..];
                assert!(inner.starts_with("escapeHtml("), "unescaped interpolation in: {line}");
                rest = inner;
            }
        }
    }

    #[test]
    fn client_never_inserts_zone_names_raw() {
        for raw in ["${z.name}", "${f.sourceName}", "${f.targetName}", "${a.message}", "${e.label}"] {
            assert!(!CLIENT_JS.contains(raw), "{raw} is inserted without escaping");
        }
    }
}
