pub fn health_html() -> &'static str {
    r#"<!doctype html>
<html lang="es">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Tunnelhub Health</title>
    <link
      href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css"
      rel="stylesheet"
      integrity="sha384-QWTKZyjpPEjISv5WaRU9OFeRpok6YctnYmDr5pNlyT2bRjXh0JMhjY6hW+ALEwIH"
      crossorigin="anonymous"
    >
    <link href="/web/css/hub.css" rel="stylesheet">
  </head>
  <body>
    <div class="container py-4">
      <div class="hub-panel p-4">
        <h1 class="mb-3">Tunnelhub</h1>
        <p class="text-muted">Status: ok</p>
        <button class="btn btn-hub-primary" id="resolve">Resolver backend</button>
        <h2 class="mt-4">Resultado</h2>
        <pre class="hub-log p-3" id="output">Esperando.</pre>
      </div>
    </div>
    <script>
      const button = document.getElementById('resolve');
      const output = document.getElementById('output');
      button.addEventListener('click', async () => {
        output.textContent = 'Verificando...';
        try {
          const response = await fetch('/api/resolve', { method: 'POST' });
          const data = await response.json();
          output.textContent = JSON.stringify(data, null, 2);
        } catch (error) {
          output.textContent = 'Error: ' + error;
        }
      });
    </script>
  </body>
</html>
"#
}
